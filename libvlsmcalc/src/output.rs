use std::io;


/// A color for text output.
///
/// Matches the ANSI color codes for color terminals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}
impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black, Color::DarkBlue, Color::DarkGreen, Color::DarkCyan,
        Color::DarkRed, Color::DarkMagenta, Color::DarkYellow, Color::Gray,
        Color::DarkGray, Color::Blue, Color::Green, Color::Cyan,
        Color::Red, Color::Magenta, Color::Yellow, Color::White,
    ];

    #[cfg(feature = "console")]
    fn to_style(self) -> console::Style {
        let style = console::Style::new();
        match self {
            Color::Black => style.black(),
            Color::DarkBlue => style.blue(),
            Color::DarkGreen => style.green(),
            Color::DarkCyan => style.cyan(),
            Color::DarkRed => style.red(),
            Color::DarkMagenta => style.magenta(),
            Color::DarkYellow => style.yellow(),
            Color::Gray => style.white(),
            Color::DarkGray => style.black().bright(),
            Color::Blue => style.blue().bright(),
            Color::Green => style.green().bright(),
            Color::Cyan => style.cyan().bright(),
            Color::Red => style.red().bright(),
            Color::Magenta => style.magenta().bright(),
            Color::Yellow => style.yellow().bright(),
            Color::White => style.white().bright(),
        }
    }
}


/// A sink that can receive textual data.
pub trait Output : io::Write {
    fn in_color<'a>(&'a mut self, color: Color) -> Box<dyn io::Write + 'a>;
}


/// Outputs text to standard output.
pub struct StdoutOutput;
impl io::Write for StdoutOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}
impl Output for StdoutOutput {
    #[cfg(feature = "console")]
    fn in_color<'a>(&'a mut self, color: Color) -> Box<dyn io::Write + 'a> {
        // honors NO_COLOR, CLICOLOR and whether stdout is a terminal
        if console::colors_enabled() {
            Box::new(StdoutStyledOutput::new(color))
        } else {
            Box::new(StdoutOutput)
        }
    }

    #[cfg(not(feature = "console"))]
    fn in_color<'a>(&'a mut self, _color: Color) -> Box<dyn io::Write + 'a> {
        Box::new(StdoutOutput)
    }
}

/// Outputs text to standard error.
pub struct StderrOutput;
impl io::Write for StderrOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().lock().flush()
    }
}
impl Output for StderrOutput {
    fn in_color<'a>(&'a mut self, _color: Color) -> Box<dyn io::Write + 'a> {
        // no color on stderr
        Box::new(StderrOutput)
    }
}

/// Outputs text to standard output in a color, using the terminal styling of the `console` crate.
#[cfg(feature = "console")]
pub struct StdoutStyledOutput {
    style: console::Style,
}
#[cfg(feature = "console")]
impl StdoutStyledOutput {
    pub fn new(color: Color) -> Self {
        Self {
            style: color.to_style().force_styling(true),
        }
    }
}
#[cfg(feature = "console")]
impl io::Write for StdoutStyledOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut stdout_lock = io::stdout().lock();
        write!(stdout_lock, "{}", self.style.apply_to(text))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}


/// Collects text in memory, without color.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BufferOutput {
    buffer: Vec<u8>,
}
impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] { &self.buffer }

    /// Returns the collected text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}
impl io::Write for BufferOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
impl Output for BufferOutput {
    fn in_color<'a>(&'a mut self, _color: Color) -> Box<dyn io::Write + 'a> {
        Box::new(&mut self.buffer)
    }
}
