//! Binding errors
//!
//! The binding has no failure modes of its own; everything here is a
//! platform error passed through unchanged.

use nativeview_css::SelectorError;
use nativeview_dom::DomError;
use nativeview_html::ParseError;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// View errors
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativeview_css::SelectorList;

    #[test]
    fn test_messages_pass_through() {
        let err: ViewError = DomError::NotFound.into();
        assert_eq!(err.to_string(), "Node not found");

        let err: ViewError = SelectorList::parse("div[").unwrap_err().into();
        assert!(err.to_string().starts_with("'div[' is not a valid selector"));
    }
}
