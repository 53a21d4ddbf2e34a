use std::fmt;

/// Route registration error
///
/// Returned by [`TrieBuilder`](super::TrieBuilder) and the route table loader when a
/// declared route cannot be placed in the trie. Lookup failures are not errors:
/// [`Router::resolve`](super::Router::resolve) reports them as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A dynamic segment was declared without a parameter name (`:` or `{}`)
    EmptyParamName {
        /// The pattern containing the empty parameter
        pattern: String,
    },
    /// A node already has a dynamic child bound to a different parameter name
    ///
    /// Each node holds at most one dynamic child, so `/users/:id` and
    /// `/users/:user_id/posts` cannot both be registered.
    ParamNameConflict {
        /// The pattern being registered
        pattern: String,
        /// Parameter name already bound at this position
        existing: String,
        /// Parameter name the pattern asked for
        requested: String,
    },
    /// Middleware was attached to a pattern that no registered route lives at
    /// or below
    ///
    /// Creating the node would add an empty literal branch that outranks a
    /// dynamic sibling, so the pattern is rejected instead.
    UnknownPrefix {
        /// The pattern the middleware was attached to
        pattern: String,
    },
    /// The HTTP method is not one of the supported verbs
    UnsupportedMethod {
        /// The method as written in the declaration
        method: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::EmptyParamName { pattern } => {
                write!(
                    f,
                    "route error: empty parameter name in pattern '{}'",
                    pattern
                )
            }
            RouteError::ParamNameConflict {
                pattern,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "route error: pattern '{}' binds parameter '{}' where '{}' is already declared. \
                    A path position can only capture one parameter name.",
                    pattern, requested, existing
                )
            }
            RouteError::UnknownPrefix { pattern } => {
                write!(
                    f,
                    "route error: no route is registered at or below '{}'. \
                    Register routes before attaching middleware to their prefix.",
                    pattern
                )
            }
            RouteError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "route error: unsupported HTTP method '{}'. \
                    Expected one of GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD, TRACE",
                    method
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
