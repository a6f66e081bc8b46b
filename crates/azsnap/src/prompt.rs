use std::io::{self, BufRead, Write};

/// Prompt for a date, showing the computed default; empty input takes
/// the default.
pub fn prompt_date(label: &str, default: &str) -> io::Result<String> {
    print!("Enter {label} date (YYYY-MM-DD) [{default}]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(apply_default(&line, default))
}

fn apply_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
