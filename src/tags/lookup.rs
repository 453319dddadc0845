/// Lookup mode resolution and dispatch against a `TagService`.
use super::errors::TagError;
use super::model::Tag;
use crate::rest::RestError;

/// The two operations `info` needs from the tagging service.
pub trait TagService {
    /// Fetch a single tag by ID.
    ///
    /// # Errors
    ///
    /// Returns `RestError::NotFound` if no tag has this ID.
    fn get_tag(&self, id: &str) -> Result<Tag, RestError>;

    /// Fetch every tag in `category_id` whose name is `name`, in service order.
    ///
    /// An empty vector is a valid result.
    ///
    /// # Errors
    ///
    /// Returns `RestError` when the category is invalid or the call fails.
    fn get_tags_by_name_for_category(
        &self,
        name: &str,
        category_id: &str,
    ) -> Result<Vec<Tag>, RestError>;
}

impl<T: TagService + ?Sized> TagService for &T {
    fn get_tag(&self, id: &str) -> Result<Tag, RestError> {
        (**self).get_tag(id)
    }

    fn get_tags_by_name_for_category(
        &self,
        name: &str,
        category_id: &str,
    ) -> Result<Vec<Tag>, RestError> {
        (**self).get_tags_by_name_for_category(name, category_id)
    }
}

/// A single tag lookup, by ID or by name within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    ById { id: String },
    ByNameAndCategory { name: String, category_id: String },
}

impl LookupRequest {
    /// Resolve the lookup mode from the `-i` flag and the positional arguments.
    ///
    /// With `by_id`, exactly one argument (the tag ID) is required; otherwise
    /// exactly two (tag name, then category ID).
    ///
    /// # Errors
    ///
    /// Returns `TagError::Usage` on any other argument count.
    pub fn from_args(by_id: bool, args: &[String]) -> Result<Self, TagError> {
        match (by_id, args) {
            (true, [id]) => Ok(Self::ById { id: id.clone() }),
            (false, [name, category_id]) => Ok(Self::ByNameAndCategory {
                name: name.clone(),
                category_id: category_id.clone(),
            }),
            (true, _) => Err(TagError::Usage {
                message: format!("expected exactly 1 argument (TAGID), got {}", args.len()),
            }),
            (false, _) => Err(TagError::Usage {
                message: format!(
                    "expected exactly 2 arguments (TAGNAME CATEGORYID), got {}",
                    args.len()
                ),
            }),
        }
    }
}

/// Perform the lookup with exactly one service call.
///
/// `ById` yields one tag; `ByNameAndCategory` yields zero or more.
///
/// # Errors
///
/// Service errors are returned unchanged as `TagError::Rest`.
pub fn fetch<S: TagService + ?Sized>(
    service: &S,
    request: &LookupRequest,
) -> Result<Vec<Tag>, TagError> {
    match request {
        LookupRequest::ById { id } => Ok(vec![service.get_tag(id)?]),
        LookupRequest::ByNameAndCategory { name, category_id } => {
            Ok(service.get_tags_by_name_for_category(name, category_id)?)
        }
    }
}
