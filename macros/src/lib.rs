//! Proc macros for arbor: `tree!` markup for building node hierarchies.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `arbor`.

use proc_macro::TokenStream;

mod tree_macro;

/// RSX-style tree literal.
///
/// Transforms nested `<Node>` markup into `arbor::model::TreeNode` builder
/// calls and evaluates to a `Vec<TreeNode>` of roots.
///
/// # Syntax
///
/// - `<Node id="a" />`: leaf node
/// - `<Node id="a" label="Alpha"> ... </Node>`: node with loaded children
///
/// # Attributes
///
/// - `id` (required): node id
/// - `label`: display label, defaults to the id
/// - `lazy="true"`: children are fetched on first expansion
/// - `disabled="true"`: node ignores expansion and selection
///
/// # Example
///
/// ```ignore
/// let roots = tree! {
///     <Node id="docs" label="Documents">
///         <Node id="cv" label="cv.pdf" />
///     </Node>
///     <Node id="photos" label="Photos" lazy="true" />
/// };
/// ```
#[proc_macro]
pub fn tree(input: TokenStream) -> TokenStream {
    tree_macro::tree_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
