mod environment;
mod operations;
mod table;

use std::io::{self, BufRead, Write};

use hapmgr::locale::Translate;

pub(crate) use environment::{Severity, issue_messages, issue_severity};
pub(crate) use operations::{
    format_batch_summary, format_operation_subtitle, format_operation_title,
    format_package_banner, format_result_line,
};
pub(crate) use table::render_table;

/// Asks a yes/no question listing `packages`; anything but `y`/`yes` declines.
pub(crate) fn confirm(
    question: &str,
    packages: &[String],
    tr: &dyn Translate,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<bool> {
    writeln!(output, "{}\n", tr.translate(question))?;
    for package in packages {
        writeln!(output, "  {}", package)?;
    }
    write!(output, "\n[y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapmgr::locale::Untranslated;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = io::Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let confirmed = confirm(
            "Install the following packages?",
            &["fldigi".to_string(), "wsjtx".to_string()],
            &Untranslated,
            &mut input,
            &mut output,
        )
        .expect("prompt");
        (confirmed, String::from_utf8(output).expect("utf8 prompt"))
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("no\n").0);
        assert!(!ask("").0);
    }

    #[test]
    fn prompt_lists_every_package() {
        let (_, prompt) = ask("n\n");
        assert!(prompt.starts_with("Install the following packages?"));
        assert!(prompt.contains("  fldigi\n"));
        assert!(prompt.contains("  wsjtx\n"));
    }
}
