// Adapters layer: concrete reply senders for the outbound message boundary.

pub mod console;
pub mod line;

pub use console::ConsoleReplySender;
pub use line::LineReplySender;
