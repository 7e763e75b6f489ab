use scraper::{ElementRef, Node};

/// Content of an element, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomChild {
    /// A child element, by node ID
    Element(usize),
    /// A raw text node
    Text(String),
}

/// A node in the DOM tree representing an element
#[derive(Debug, Clone)]
pub struct DomNode {
    /// The lowercase tag name of the element
    pub tag_name: String,
    /// Entries of the `class` attribute
    pub classes: Vec<String>,
    /// Children in document order
    pub children: Vec<DomChild>,
}

impl DomNode {
    fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            tag_name: value.name().to_lowercase(),
            classes: value.classes().map(str::to_string).collect(),
            children: Vec::new(),
        }
    }

    /// Check whether the element carries `class` in its class list
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Structural predicate over a single element: optional tag name plus
/// required class membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher<'a> {
    /// Tag name to match, any tag when `None`
    pub tag: Option<&'a str>,
    /// Class that must be present in the class list
    pub class: &'a str,
}

impl<'a> Matcher<'a> {
    /// Match any element carrying `class`
    pub const fn class(class: &'a str) -> Self {
        Self { tag: None, class }
    }

    /// Match `tag` elements carrying `class`
    pub const fn tag_class(tag: &'a str, class: &'a str) -> Self {
        Self { tag: Some(tag), class }
    }

    /// Test a node against the predicate
    pub fn matches(&self, node: &DomNode) -> bool {
        self.tag.is_none_or(|tag| node.tag_name.eq_ignore_ascii_case(tag)) && node.has_class(self.class)
    }
}

/// An owned element tree of elements and text nodes.
///
/// Built once from a parsed document; all lookups afterwards are plain walks
/// over this structure. Walks keep their own stack, so nesting depth is
/// bounded by memory only.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    /// All nodes in the tree, in document (pre-)order
    nodes: Vec<DomNode>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node to the tree
    fn add_node(&mut self, node: DomNode) -> usize {
        let node_id = self.nodes.len();
        self.nodes.push(node);
        node_id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: usize) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    /// Get the root element ID, if the tree holds any element
    pub fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() { None } else { Some(0) }
    }

    /// Get the total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn children(&self, node_id: usize) -> &[DomChild] {
        match self.nodes.get(node_id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// All descendants of `node_id` (excluding itself) that satisfy `matcher`,
    /// in document order. Nested matches are included.
    pub fn find_all(&self, node_id: usize, matcher: &Matcher<'_>) -> Vec<usize> {
        let mut found = Vec::new();
        self.walk(node_id, |id| {
            if matcher.matches(&self.nodes[id]) {
                found.push(id);
            }
            true
        });
        found
    }

    /// First descendant of `node_id` (excluding itself) that satisfies `matcher`
    pub fn find_first(&self, node_id: usize, matcher: &Matcher<'_>) -> Option<usize> {
        let mut found = None;
        self.walk(node_id, |id| {
            if matcher.matches(&self.nodes[id]) {
                found = Some(id);
                return false;
            }
            true
        });
        found
    }

    fn element_children(&self, node_id: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.children(node_id).iter().filter_map(|child| match child {
            DomChild::Element(id) => Some(*id),
            DomChild::Text(_) => None,
        })
    }

    /// Pre-order walk over the element descendants of `node_id`. The visitor
    /// returns `false` to stop the walk.
    fn walk(&self, node_id: usize, mut visit: impl FnMut(usize) -> bool) {
        let mut stack: Vec<usize> = self.element_children(node_id).rev().collect();
        while let Some(id) = stack.pop() {
            if !visit(id) {
                return;
            }
            stack.extend(self.element_children(id).rev());
        }
    }

    /// All text nodes beneath `node_id`, in document order
    pub fn text_fragments(&self, node_id: usize) -> Vec<&str> {
        let mut fragments = Vec::new();
        let mut stack: Vec<&DomChild> = self.children(node_id).iter().rev().collect();

        while let Some(child) = stack.pop() {
            match child {
                DomChild::Text(text) => fragments.push(text.as_str()),
                DomChild::Element(id) => stack.extend(self.children(*id).iter().rev()),
            }
        }
        fragments
    }

    /// Concatenated text of `node_id`, exactly as in the markup
    pub fn text(&self, node_id: usize) -> String {
        self.text_fragments(node_id).concat()
    }
}

/// Build a DOM tree from a parsed scraper document
///
/// Comments, doctypes and processing instructions are dropped; elements and
/// text nodes are kept in document order. Node IDs are assigned in pre-order.
pub fn build_dom_tree(root: ElementRef<'_>) -> DomTree {
    let mut tree = DomTree::new();
    let root_id = tree.add_node(DomNode::from_element(root));

    // (element id, next scraper child still to visit)
    let mut stack = vec![(root_id, root.first_child())];

    while let Some(top) = stack.last_mut() {
        let parent_id = top.0;
        let Some(child) = top.1.take() else {
            stack.pop();
            continue;
        };
        top.1 = child.next_sibling();

        match child.value() {
            Node::Text(text) => tree.nodes[parent_id].children.push(DomChild::Text(String::from(&**text))),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    let node_id = tree.add_node(DomNode::from_element(element));
                    tree.nodes[parent_id].children.push(DomChild::Element(node_id));
                    stack.push((node_id, child.first_child()));
                }
            }
            _ => {}
        }
    }

    tree
}
