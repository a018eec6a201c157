//! 数据模型层

pub mod error;
pub mod file_tree;
pub mod highlight;
pub mod id;
pub mod placeholder;
pub mod selection;
pub mod text_buffer;

pub use error::TemplateError;
pub use file_tree::{is_valid_name, FileNode, FileTreeRow, NodeKind, TemplateTree, ROOT_FILE_NAME};
pub use highlight::{highlight, token_titles, Segment, SegmentKind};
pub use id::{FileId, IdGen, PlaceholderId, ROOT_FILE_ID};
pub use placeholder::{Placeholder, PlaceholderCatalog, TOKEN_DELIMITER};
pub use selection::Selection;
pub use text_buffer::{slice_to_cow, TextBuffer};
