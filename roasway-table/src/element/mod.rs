mod node;
mod selector;

pub use node::Element;
pub use selector::{Selector, SelectorError};

/// Child-index path from the document root to an element.
///
/// Paths stay valid as long as no element before them is inserted or
/// removed; the engine only ever appends.
pub type NodePath = Vec<usize>;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find the path of an element by ID.
pub fn find_path(root: &Element, id: &str) -> Option<NodePath> {
    fn walk(element: &Element, id: &str, path: &mut NodePath) -> bool {
        if element.id == id {
            return true;
        }
        for (i, child) in element.children.iter().enumerate() {
            path.push(i);
            if walk(child, id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = NodePath::new();
    walk(root, id, &mut path).then_some(path)
}

pub fn node_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter()
        .try_fold(root, |element, &i| element.children.get(i))
}

pub fn node_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    path.iter()
        .try_fold(root, |element, &i| element.children.get_mut(i))
}

/// All elements below the root matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &Selector) -> Vec<NodePath> {
    query_within(root, &[], selector)
}

/// All descendants of the element at `scope` matching `selector`, in
/// document order. Ancestors above the scope still take part in matching.
pub fn query_within(root: &Element, scope: &[usize], selector: &Selector) -> Vec<NodePath> {
    let mut ancestors = Vec::with_capacity(scope.len() + 1);
    let mut element = root;
    for &i in scope {
        ancestors.push(element);
        match element.children.get(i) {
            Some(child) => element = child,
            None => return Vec::new(),
        }
    }
    ancestors.push(element);

    let mut result = Vec::new();
    let mut path = scope.to_vec();
    collect_matches(element, selector, &mut ancestors, &mut path, &mut result);
    result
}

fn collect_matches<'a>(
    parent: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
    path: &mut NodePath,
    result: &mut Vec<NodePath>,
) {
    for (i, child) in parent.children.iter().enumerate() {
        path.push(i);
        if selector.matches(child, ancestors) {
            result.push(path.clone());
        }
        if !child.children.is_empty() {
            ancestors.push(child);
            collect_matches(child, selector, ancestors, path, result);
            ancestors.pop();
        }
        path.pop();
    }
}

/// Descendants of the element at `scope` for which `pred` holds, in
/// document order.
pub fn find_within(
    root: &Element,
    scope: &[usize],
    pred: impl Fn(&Element) -> bool,
) -> Vec<NodePath> {
    fn walk(
        element: &Element,
        pred: &dyn Fn(&Element) -> bool,
        path: &mut NodePath,
        result: &mut Vec<NodePath>,
    ) {
        for (i, child) in element.children.iter().enumerate() {
            path.push(i);
            if pred(child) {
                result.push(path.clone());
            }
            walk(child, pred, path, result);
            path.pop();
        }
    }

    let mut result = Vec::new();
    if let Some(start) = node_at(root, scope) {
        let mut path = scope.to_vec();
        walk(start, &pred, &mut path, &mut result);
    }
    result
}

/// Descendants of `scope` carrying `class`, in document order.
pub fn with_class(root: &Element, scope: &[usize], class: &str) -> Vec<NodePath> {
    find_within(root, scope, |e| e.has_class(class))
}

/// First descendant of `scope` carrying `class`.
pub fn first_with_class(root: &Element, scope: &[usize], class: &str) -> Option<NodePath> {
    with_class(root, scope, class).into_iter().next()
}
