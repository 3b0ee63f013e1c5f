use std::io::{self, BufRead, Stdin, Stdout, Write};

/// Interactive surface of the purchase flow
pub trait UserPrompt {
    /// `y` is true and `n` is false; any other answer, or none, yields `default`.
    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool>;

    /// Trimmed answer, or `default` when the answer is empty.
    fn prompt_value(&mut self, prompt: &str, default: &str) -> io::Result<String>;

    fn show(&mut self, message: &str) -> io::Result<()>;
}

/// Line-based prompt over any reader/writer pair
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        let mut line = String::new();
        // EOF leaves the line empty, which callers treat as "use the default"
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> UserPrompt for ConsolePrompt<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(match answer.to_lowercase().as_str() {
            "y" => true,
            "n" => false,
            _ => default,
        })
    }

    fn prompt_value(&mut self, prompt: &str, default: &str) -> io::Result<String> {
        let answer = self.ask(prompt)?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    fn show(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }
}
