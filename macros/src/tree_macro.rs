//! RSX tree! macro: parse `<Node>` markup and generate arbor TreeNode code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A parsed attribute: `name="value"`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: LitStr,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .field("value", &self.value.value())
            .finish()
    }
}

/// A parsed element: `<Node attrs... />` or `<Node attrs...> children </Node>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

impl Element {
    fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name == name)
    }
}

/// The top-level tree! input: a sequence of root elements.
#[derive(Debug)]
struct TreeInput {
    elements: Vec<Element>,
}

/// The only element name accepted.
const NODE_TAG: &str = "Node";

/// Attributes a `<Node>` may carry.
const KNOWN_ATTRS: &[&str] = &["id", "label", "lazy", "disabled"];

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for TreeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(TreeInput { elements })
    }
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag: Ident = input.parse()?;
    if tag != NODE_TAG {
        return Err(Error::new(
            tag.span(),
            format!("unknown element `<{tag}>`, expected `<{NODE_TAG}>`"),
        ));
    }

    let mut attrs: Vec<Attribute> = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let attr_name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let attr_value: LitStr = input.parse()?;
        if !KNOWN_ATTRS.contains(&attr_name.to_string().as_str()) {
            return Err(Error::new(
                attr_name.span(),
                format!(
                    "unknown attribute `{attr_name}`, expected one of: {}",
                    KNOWN_ATTRS.join(", ")
                ),
            ));
        }
        if attrs.iter().any(|a| a.name == attr_name) {
            return Err(Error::new(
                attr_name.span(),
                format!("duplicate attribute `{attr_name}`"),
            ));
        }
        attrs.push(Attribute {
            name: attr_name,
            value: attr_value,
        });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag: Ident = input.parse()?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!("mismatched closing tag: expected `</{tag}>`, found `</{closing_tag}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child node or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

/// Read a `"true"` / `"false"` attribute.
fn flag(elem: &Element, name: &str) -> Result<bool> {
    match elem.attr(name) {
        None => Ok(false),
        Some(attr) => match attr.value.value().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(Error::new(
                attr.value.span(),
                format!("`{name}` must be \"true\" or \"false\", found {other:?}"),
            )),
        },
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate a `TreeNode` expression for one element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let id = elem
        .attr("id")
        .map(|a| a.value.clone())
        .ok_or_else(|| Error::new(elem.tag.span(), "`<Node>` requires an `id` attribute"))?;
    // The label falls back to the id.
    let label = elem.attr("label").map(|a| a.value.clone()).unwrap_or_else(|| id.clone());
    let lazy = flag(elem, "lazy")?;
    let disabled = flag(elem, "disabled")?;

    if lazy && !elem.children.is_empty() {
        return Err(Error::new(
            elem.tag.span(),
            "a lazy node cannot declare children; they arrive from the loader",
        ));
    }

    let constructor = if lazy {
        quote! { ::arbor::model::TreeNode::lazy(#id, #label) }
    } else {
        quote! { ::arbor::model::TreeNode::new(#id, #label) }
    };

    let mut builder_calls = Vec::new();
    if !elem.children.is_empty() {
        let children = elem
            .children
            .iter()
            .map(generate_element)
            .collect::<Result<Vec<_>>>()?;
        builder_calls.push(quote! { .with_children(::std::vec![#(#children),*]) });
    }
    if disabled {
        builder_calls.push(quote! { .disabled(true) });
    }

    Ok(quote! {
        #constructor #(#builder_calls)*
    })
}

/// Entry point: generate code for the entire tree! macro.
pub(crate) fn tree_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: TreeInput = syn::parse2(input)?;

    if parsed.elements.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "tree! macro requires at least one node",
        ));
    }

    let roots = parsed
        .elements
        .iter()
        .map(generate_element)
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        {
            let __roots: ::std::vec::Vec<::arbor::model::TreeNode> = ::std::vec![#(#roots),*];
            __roots
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_tree(tokens: TokenStream) -> Result<TreeInput> {
        syn::parse2(tokens)
    }

    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        syn::parse2::<TreeInput>(tokens).map(|v| v.elements.into_iter().next().unwrap())
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_node() {
        let elem = parse_single_element(quote! { <Node id="a" label="Alpha" /> }).unwrap();
        assert_eq!(elem.tag.to_string(), "Node");
        assert!(elem.self_closing);
        assert!(elem.children.is_empty());
        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[1].name.to_string(), "label");
        assert_eq!(elem.attrs[1].value.value(), "Alpha");
    }

    #[test]
    fn parse_nested_nodes() {
        let elem = parse_single_element(quote! {
            <Node id="a">
                <Node id="a1" />
                <Node id="a2">
                    <Node id="a2x" />
                </Node>
            </Node>
        })
        .unwrap();
        assert!(!elem.self_closing);
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children[1].children.len(), 1);
    }

    #[test]
    fn parse_multiple_roots() {
        let tree = parse_tree(quote! {
            <Node id="a" />
            <Node id="b" lazy="true" />
        })
        .unwrap();
        assert_eq!(tree.elements.len(), 2);
    }

    #[test]
    fn parse_error_unknown_element() {
        let err = parse_single_element(quote! { <Leaf id="a" /> }).unwrap_err();
        assert!(err.to_string().contains("unknown element"));
    }

    #[test]
    fn parse_error_unknown_attribute() {
        let err = parse_single_element(quote! { <Node id="a" class="x" /> }).unwrap_err();
        assert!(err.to_string().contains("unknown attribute `class`"));
    }

    #[test]
    fn parse_error_duplicate_attribute() {
        let err = parse_single_element(quote! { <Node id="a" id="b" /> }).unwrap_err();
        assert!(err.to_string().contains("duplicate attribute"));
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let err = parse_single_element(quote! {
            <Node id="a">
                <Node id="a1" />
            </Leaf>
        })
        .unwrap_err();
        assert!(err.to_string().contains("mismatched closing tag"));
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_leaf_uses_id_as_label() {
        let elem = parse_single_element(quote! { <Node id="a" /> }).unwrap();
        let code = generate_element(&elem).unwrap().to_string();
        assert!(code.contains("TreeNode :: new (\"a\" , \"a\")"), "got: {code}");
    }

    #[test]
    fn codegen_lazy_and_disabled() {
        let elem =
            parse_single_element(quote! { <Node id="b" label="Beta" lazy="true" disabled="true" /> })
                .unwrap();
        let code = generate_element(&elem).unwrap().to_string();
        assert!(code.contains("TreeNode :: lazy (\"b\" , \"Beta\")"), "got: {code}");
        assert!(code.contains("disabled (true)"), "got: {code}");
    }

    #[test]
    fn codegen_children() {
        let elem = parse_single_element(quote! {
            <Node id="a">
                <Node id="a1" />
            </Node>
        })
        .unwrap();
        let code = generate_element(&elem).unwrap().to_string();
        assert!(code.contains("with_children"), "got: {code}");
        assert!(code.contains("TreeNode :: new (\"a1\" , \"a1\")"), "got: {code}");
    }

    #[test]
    fn codegen_missing_id_is_error() {
        let elem = parse_single_element(quote! { <Node label="x" /> }).unwrap();
        let err = generate_element(&elem).unwrap_err();
        assert!(err.to_string().contains("requires an `id`"));
    }

    #[test]
    fn codegen_lazy_with_children_is_error() {
        let elem = parse_single_element(quote! {
            <Node id="b" lazy="true">
                <Node id="b1" />
            </Node>
        })
        .unwrap();
        assert!(generate_element(&elem).is_err());
    }

    #[test]
    fn codegen_bad_flag_is_error() {
        let elem = parse_single_element(quote! { <Node id="b" lazy="yes" /> }).unwrap();
        let err = generate_element(&elem).unwrap_err();
        assert!(err.to_string().contains("must be \"true\" or \"false\""));
    }

    #[test]
    fn codegen_full_tree() {
        let code = tree_impl(quote! {
            <Node id="a" />
            <Node id="b" lazy="true" />
        })
        .unwrap()
        .to_string();
        assert!(code.contains("__roots"));
        assert!(code.contains("TreeNode :: lazy (\"b\" , \"b\")"));
    }

    #[test]
    fn codegen_empty_tree_is_error() {
        let err = tree_impl(quote! {}).unwrap_err();
        assert!(err.to_string().contains("at least one node"));
    }
}
