use std::io::{self, BufRead, Write};

/// Shows a yes/no dialog on the terminal. `assume_yes` answers it without
/// reading stdin.
pub fn confirm(title: &str, question: &str, assume_yes: bool) -> io::Result<bool> {
    println!("{title}");
    if assume_yes {
        return Ok(true);
    }
    ask(question, &mut io::stdin().lock(), &mut io::stdout())
}

fn ask(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
