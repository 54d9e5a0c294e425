use xmltree::{Element, XMLNode};

/// Namespace qualifier taken from the document root. Every child lookup in
/// the document is qualified with it, so a root tag of
/// `{http://example}COLLADA` only matches children in that same namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Ns(Option<String>);

impl Ns {
    pub fn of_root(root: &Element) -> Self {
        Ns(root.namespace.clone())
    }

    /// True when `el` is `tag` qualified with this namespace.
    pub fn qualifies(&self, el: &Element, tag: &str) -> bool {
        el.name == tag && el.namespace.as_deref() == self.0.as_deref()
    }

    /// The `{uri}` prefix form of the namespace; empty for unnamespaced
    /// documents.
    pub fn prefix(&self) -> String {
        match &self.0 {
            Some(uri) => format!("{{{uri}}}"),
            None => String::new(),
        }
    }
}

/// `#id` → `id`. References without the marker pass through unchanged.
pub(crate) fn strip_ref(reference: &str) -> &str {
    reference.strip_prefix('#').unwrap_or(reference)
}

pub(crate) fn child<'a>(el: &'a Element, ns: &Ns, tag: &str) -> Option<&'a Element> {
    el.children
        .iter()
        .filter_map(XMLNode::as_element)
        .find(|c| ns.qualifies(c, tag))
}

pub(crate) fn children<'a>(
    el: &'a Element,
    ns: &'a Ns,
    tag: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    el.children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(move |c| ns.qualifies(c, tag))
}

/// Every descendant of `el` (excluding `el` itself) matching `tag`, in
/// document order.
pub(crate) fn descendants<'a>(el: &'a Element, ns: &Ns, tag: &str) -> Vec<&'a Element> {
    let mut out = Vec::new();
    collect_descendants(el, ns, tag, &mut out);
    out
}

fn collect_descendants<'a>(el: &'a Element, ns: &Ns, tag: &str, out: &mut Vec<&'a Element>) {
    for node in &el.children {
        if let Some(c) = node.as_element() {
            if ns.qualifies(c, tag) {
                out.push(c);
            }
            collect_descendants(c, ns, tag, out);
        }
    }
}

/// First descendant of `el` matching `tag` in document order, if any.
pub(crate) fn first_descendant<'a>(el: &'a Element, ns: &Ns, tag: &str) -> Option<&'a Element> {
    for node in &el.children {
        if let Some(c) = node.as_element() {
            if ns.qualifies(c, tag) {
                return Some(c);
            }
            if let Some(found) = first_descendant(c, ns, tag) {
                return Some(found);
            }
        }
    }
    None
}
