//! Idle-prompt heuristics for the readiness gate.
//!
//! A pane is considered idle when its last non-blank line looks like a
//! shell prompt waiting for input: either a marker prompt previously
//! installed for that pane (stored in the context store), or a generic
//! prompt-terminator heuristic.

/// Characters that commonly terminate an interactive shell prompt.
const PROMPT_TERMINATORS: &[char] = &['$', '%', '>', '#', '❯'];

/// Last non-blank line of a snapshot, if any.
pub fn last_nonblank(lines: &[String]) -> Option<&str> {
    lines
        .iter()
        .rev()
        .map(|l| l.trim_end())
        .find(|l| !l.is_empty())
}

/// Test one line against the idle-prompt pattern.
///
/// When `prompt_marker` is set, only an exact marker suffix counts —
/// the generic heuristic is bypassed so interactive programs that
/// happen to end output in `>` are not mistaken for an idle shell.
pub fn is_idle_prompt(line: &str, prompt_marker: Option<&str>) -> bool {
    let trimmed = line.trim_end();
    if trimmed.is_empty() {
        return false;
    }
    if let Some(marker) = prompt_marker {
        return !marker.is_empty() && trimmed.ends_with(marker);
    }
    trimmed
        .chars()
        .next_back()
        .is_some_and(|c| PROMPT_TERMINATORS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn common_shell_prompts_match() {
        for prompt in ["$", "user@host:~$", "%", "❯", "sh-5.2#", "PS >"] {
            assert!(is_idle_prompt(prompt, None), "{prompt:?} should be idle");
        }
    }

    #[test]
    fn trailing_space_after_prompt_matches() {
        assert!(is_idle_prompt("user@host:~$ ", None));
    }

    #[test]
    fn mid_output_lines_do_not_match() {
        for line in ["compiling...", "downloading 42%  done", "", "   "] {
            assert!(!is_idle_prompt(line, None), "{line:?} should not be idle");
        }
    }

    #[test]
    fn installed_marker_takes_precedence() {
        // Marker set: the heuristic must not fire on a generic `>` line.
        assert!(!is_idle_prompt("continue? >", Some("::ready::")));
        assert!(is_idle_prompt("prompt ::ready::", Some("::ready::")));
    }

    #[test]
    fn empty_marker_never_matches() {
        assert!(!is_idle_prompt("user@host:~$", Some("")));
    }

    #[test]
    fn last_nonblank_skips_trailing_blanks() {
        let snap = lines(&["output", "user@host:~$", "", "   "]);
        assert_eq!(last_nonblank(&snap), Some("user@host:~$"));
    }

    #[test]
    fn last_nonblank_empty_snapshot() {
        assert_eq!(last_nonblank(&lines(&[])), None);
        assert_eq!(last_nonblank(&lines(&["", "  "])), None);
    }
}
