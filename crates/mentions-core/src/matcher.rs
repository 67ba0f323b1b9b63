//! Prefix matching of a query against the user directory.

use crate::fold::fold;
use crate::model::User;

/// Users whose folded name starts with the folded `query`, in directory order.
///
/// An empty query returns the whole directory, which is what the candidate
/// list shows right after a bare `@`.
#[must_use]
pub fn find_candidates(directory: &[User], query: &str) -> Vec<User> {
    if query.is_empty() {
        return directory.to_vec();
    }

    let folded_query = fold(query);
    directory
        .iter()
        .filter(|user| fold(&user.name).starts_with(&folded_query))
        .cloned()
        .collect()
}
