use arboard::Clipboard;

use super::errors::InfraError;

/// Places `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), InfraError> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
