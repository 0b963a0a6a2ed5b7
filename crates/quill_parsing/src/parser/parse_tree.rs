//! The labeled tree produced by the parser

use quill_tokens::spanned::Span;
use quill_tokens::token::{ToTokens, Token, TokenStream};
use std::fmt::{Display, Formatter};
use std::iter;

/// A node of the parse tree.
///
/// Leaves wrap the tokens that carry information (identifiers, literals, datatypes and
/// operators). Keywords and punctuation are implied by the label of their branch.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Leaf(Token),
    Branch {
        label: &'static str,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    #[inline]
    pub fn branch(label: &'static str, children: Vec<ParseNode>) -> Self {
        Self::Branch { label, children }
    }

    /// The label of this node. Leaves are labeled with the class of their token.
    pub fn label(&self) -> &str {
        match self {
            ParseNode::Leaf(token) => token.kind().class_name(),
            ParseNode::Branch { label, .. } => label,
        }
    }

    /// The children of a branch. Leaves have none.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Leaf(_) => &[],
            ParseNode::Branch { children, .. } => children,
        }
    }

    /// The token of a leaf
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseNode::Leaf(token) => Some(token),
            ParseNode::Branch { .. } => None,
        }
    }

    /// Finds the first node with the given label, searching depth first and starting with this
    /// node.
    pub fn find(&self, label: &str) -> Option<&ParseNode> {
        if self.label() == label {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(label))
    }

    /// Iterates over this node and all of its descendants, depth first
    pub fn descendants(&self) -> Box<dyn Iterator<Item = &ParseNode> + '_> {
        Box::new(iter::once(self).chain(self.children().iter().flat_map(|c| c.descendants())))
    }

    /// The span covered by the leaves of this node, if it has any
    pub fn span(&self) -> Option<Span> {
        self.to_tokens().span()
    }

    fn fmt_children(&self, f: &mut Formatter<'_>, indent: &str) -> std::fmt::Result {
        let children = self.children();
        for (idx, child) in children.iter().enumerate() {
            let last = idx + 1 == children.len();
            let connector = if last { "└──" } else { "├──" };
            writeln!(f, "{indent}{connector} {}", child.heading())?;
            let nested = format!("{indent}{}", if last { "    " } else { "│   " });
            child.fmt_children(f, &nested)?;
        }
        Ok(())
    }

    fn heading(&self) -> String {
        match self {
            ParseNode::Leaf(token) => token.to_string(),
            ParseNode::Branch { label, .. } => label.to_string(),
        }
    }
}

impl Display for ParseNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading())?;
        self.fmt_children(f, "")
    }
}

impl ToTokens for ParseNode {
    fn to_tokens(&self) -> TokenStream {
        match self {
            ParseNode::Leaf(token) => TokenStream::from_iter([token.clone()]),
            ParseNode::Branch { children, .. } => children.iter().flat_map(|c| c.to_tokens()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_tokens::source::SourceFile;
    use quill_tokens::spanned::{Position, Span};
    use quill_tokens::token::{Datatype, TokenKind};

    fn leaf(kind: TokenKind) -> ParseNode {
        ParseNode::Leaf(Token::new(
            Span::at(Position::start(SourceFile::new("test", ""))),
            kind,
        ))
    }

    fn tree() -> ParseNode {
        ParseNode::branch(
            "<program>",
            vec![ParseNode::branch(
                "<declaration>",
                vec![ParseNode::branch(
                    "<var_declaration>",
                    vec![
                        leaf(TokenKind::Datatype(Datatype::Int)),
                        leaf(TokenKind::Identifier("x".to_string())),
                        ParseNode::branch(
                            "<expression>",
                            vec![ParseNode::branch(
                                "<primary_expression>",
                                vec![leaf(TokenKind::Integer(5))],
                            )],
                        ),
                    ],
                )],
            )],
        )
    }

    #[test]
    fn test_render() {
        let expected = "\
<program>
└── <declaration>
    └── <var_declaration>
        ├── (<datatype>, int)
        ├── (<identifier>, x)
        └── <expression>
            └── <primary_expression>
                └── (<number>, 5)
";
        assert_eq!(tree().to_string(), expected);
    }

    #[test]
    fn test_find() {
        let tree = tree();
        let number = tree.find("<number>").expect("no number");
        assert_eq!(number.token().map(Token::kind), Some(&TokenKind::Integer(5)));
        assert!(tree.find("<loop>").is_none());
        assert_eq!(tree.find("<program>"), Some(&tree));
        assert_eq!(tree.descendants().count(), 8);
    }

    #[test]
    fn test_to_tokens() {
        assert_eq!(tree().to_tokens().to_string(), "int x 5");
    }
}
