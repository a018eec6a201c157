use std::fmt;

/// Validation rejections raised before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    InvalidName,
    DuplicateName,
    RepeatingFolderNoSubfolders,
    RepeatingFolderSingleFileOnly,
    EmptyPlaceholderTitle,
    UnknownNode,
    ParentNotFolder,
    UnknownPlaceholder,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::InvalidName => write!(
                f,
                "invalid name: only letters, numbers, dots, hyphens and underscores are allowed"
            ),
            TemplateError::DuplicateName => write!(f, "name already exists in this location"),
            TemplateError::RepeatingFolderNoSubfolders => {
                write!(f, "a repeating folder cannot contain sub-folders")
            }
            TemplateError::RepeatingFolderSingleFileOnly => {
                write!(f, "a repeating folder can only contain a single file")
            }
            TemplateError::EmptyPlaceholderTitle => write!(f, "placeholder title is empty"),
            TemplateError::UnknownNode => write!(f, "invalid node id"),
            TemplateError::ParentNotFolder => write!(f, "parent is not a folder"),
            TemplateError::UnknownPlaceholder => write!(f, "invalid placeholder id"),
        }
    }
}

impl std::error::Error for TemplateError {}
