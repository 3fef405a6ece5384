//! Modal dialogs: the goal editor and the add-note form.

pub mod add_note;
pub mod goal_editor;

pub use add_note::{AddNoteState, NoteAction};
pub use goal_editor::{EditorAction, GoalEditorState};
