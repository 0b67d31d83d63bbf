//! Platform and CI detection.

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`, `TF_BUILD`.
pub fn is_ci() -> bool {
    is_ci_with_env(|key| std::env::var_os(key).is_some())
}

/// CI detection with a custom env lookup (for testing).
pub fn is_ci_with_env<F>(has_var: F) -> bool
where
    F: Fn(&str) -> bool,
{
    const CI_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "TF_BUILD",
    ];
    CI_VARS.iter().any(|var| has_var(var))
}

/// Separator between entries of a `PATH`-style variable.
pub fn path_list_separator() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_github_actions() {
        assert!(is_ci_with_env(|k| k == "GITHUB_ACTIONS"));
    }

    #[test]
    fn detects_azure_pipelines() {
        assert!(is_ci_with_env(|k| k == "TF_BUILD"));
    }

    #[test]
    fn no_ci_vars_means_not_ci() {
        assert!(!is_ci_with_env(|_| false));
    }

    #[test]
    fn separator_matches_platform() {
        let sep = path_list_separator();
        if cfg!(windows) {
            assert_eq!(sep, ';');
        } else {
            assert_eq!(sep, ':');
        }
    }
}
