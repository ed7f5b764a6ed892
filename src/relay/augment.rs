use crate::session::types::{Role, Turn};

/// Instruction suffix appended to the newest user turn before forwarding.
pub const MARKDOWN_INSTRUCTION: &str = " (Please respond in markdown format)";

/// Copy a conversation for forwarding, appending [`MARKDOWN_INSTRUCTION`] to
/// the final turn when that turn is a user turn.
///
/// Only the outbound copy changes: earlier turns are passed through verbatim
/// even if they were augmented on a previous request, and a conversation
/// ending in an assistant turn (or an empty one) is forwarded as-is.
pub fn augment(turns: &[Turn]) -> Vec<Turn> {
    let mut outbound = turns.to_vec();
    if let Some(last) = outbound.last_mut() {
        if last.role == Role::User {
            last.content.push_str(MARKDOWN_INSTRUCTION);
        }
    }
    outbound
}
