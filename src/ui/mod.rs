pub mod console;
pub mod recording;

pub use console::*;
pub use recording::*;

/// Which end of a command a bookend marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookendPhase {
    Start,
    End,
}

impl BookendPhase {
    pub fn label(&self) -> &'static str {
        match self {
            BookendPhase::Start => "START",
            BookendPhase::End => "END",
        }
    }
}

/// Sink for user-facing outcomes.
///
/// The sync operations report through this trait instead of printing, so the
/// same code drives the console and the tests.
pub trait Reporter: Send + Sync {
    /// Frame around a command run
    fn bookend(&self, command: &str, phase: BookendPhase, message: Option<&str>);

    /// A target was processed successfully
    fn success(&self, message: &str);

    /// A target failed, or needs user action
    fn error(&self, message: &str);

    /// Selected fields of a remote body, shown in debug mode
    fn fields(&self, rows: &[(String, String)]);

    /// Titled table with free-form rows
    fn results(&self, title: &str, rows: &[Vec<String>]);
}
