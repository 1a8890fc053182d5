//! Node kinds and per-kind payloads of the Java source tree.
//!
//! Nodes live in a flat arena owned by [`crate::SourceUnit`] and refer to
//! their children by [`NodeIndex`]. Every kind carries its children in source
//! order; [`NodeData::children`] returns them in that order.

use crate::modifiers::Modifiers;
use crate::types::PrimitiveType;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Index of a node in its unit's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_usize(index: usize) -> Self {
        NodeIndex(index as u32)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    CompilationUnit,
    ClassDeclaration,
    InterfaceDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    FieldDeclaration,
    VariableDeclarator,
    Parameter,
    TypeParameter,
    InitializerBlock,

    PrimitiveType,
    ClassType,
    ArrayType,
    IntersectionType,

    Block,
    LocalVariableDeclaration,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    SwitchStatement,
    SwitchCase,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    EmptyStatement,
    LabeledStatement,
    SynchronizedStatement,
    TryStatement,
    CatchClause,

    Literal,
    Name,
    FieldAccess,
    MethodCall,
    ObjectCreation,
    ArrayCreation,
    ArrayInitializer,
    ArrayAccess,
    Assignment,
    Binary,
    Unary,
    Conditional,
    Cast,
    InstanceOf,
    This,
    Parenthesized,
}

impl SyntaxKind {
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::CompilationUnit
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::FieldDeclaration
                | SyntaxKind::VariableDeclarator
                | SyntaxKind::Parameter
                | SyntaxKind::TypeParameter
                | SyntaxKind::InitializerBlock
        )
    }

    /// Kinds that may appear in a class or interface body.
    pub const fn is_member(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::FieldDeclaration
                | SyntaxKind::InitializerBlock
        )
    }

    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration
        )
    }

    pub const fn is_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::PrimitiveType
                | SyntaxKind::ClassType
                | SyntaxKind::ArrayType
                | SyntaxKind::IntersectionType
        )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalVariableDeclaration
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::BreakStatement
                | SyntaxKind::ContinueStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::EmptyStatement
                | SyntaxKind::LabeledStatement
                | SyntaxKind::SynchronizedStatement
                | SyntaxKind::TryStatement
        )
    }

    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::Literal
                | SyntaxKind::Name
                | SyntaxKind::FieldAccess
                | SyntaxKind::MethodCall
                | SyntaxKind::ObjectCreation
                | SyntaxKind::ArrayCreation
                | SyntaxKind::ArrayInitializer
                | SyntaxKind::ArrayAccess
                | SyntaxKind::Assignment
                | SyntaxKind::Binary
                | SyntaxKind::Unary
                | SyntaxKind::Conditional
                | SyntaxKind::Cast
                | SyntaxKind::InstanceOf
                | SyntaxKind::This
                | SyntaxKind::Parenthesized
        )
    }

    /// Human-readable construct name used in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            SyntaxKind::CompilationUnit => "compilation unit",
            SyntaxKind::ClassDeclaration => "class declaration",
            SyntaxKind::InterfaceDeclaration => "interface declaration",
            SyntaxKind::MethodDeclaration => "method declaration",
            SyntaxKind::ConstructorDeclaration => "constructor",
            SyntaxKind::FieldDeclaration => "field declaration",
            SyntaxKind::VariableDeclarator => "variable declarator",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::TypeParameter => "type parameter",
            SyntaxKind::InitializerBlock => "initializer block",
            SyntaxKind::PrimitiveType => "primitive type",
            SyntaxKind::ClassType => "class type",
            SyntaxKind::ArrayType => "array type",
            SyntaxKind::IntersectionType => "intersection type",
            SyntaxKind::Block => "block",
            SyntaxKind::LocalVariableDeclaration => "local variable declaration",
            SyntaxKind::ExpressionStatement => "expression statement",
            SyntaxKind::IfStatement => "'if' statement",
            SyntaxKind::WhileStatement => "'while' statement",
            SyntaxKind::DoStatement => "'do' statement",
            SyntaxKind::ForStatement => "'for' statement",
            SyntaxKind::ForEachStatement => "enhanced 'for' statement",
            SyntaxKind::SwitchStatement => "'switch' statement",
            SyntaxKind::SwitchCase => "'case' clause",
            SyntaxKind::ReturnStatement => "'return' statement",
            SyntaxKind::BreakStatement => "'break' statement",
            SyntaxKind::ContinueStatement => "'continue' statement",
            SyntaxKind::ThrowStatement => "'throw' statement",
            SyntaxKind::EmptyStatement => "empty statement",
            SyntaxKind::LabeledStatement => "labeled statement",
            SyntaxKind::SynchronizedStatement => "'synchronized' statement",
            SyntaxKind::TryStatement => "'try' statement",
            SyntaxKind::CatchClause => "'catch' clause",
            SyntaxKind::Literal => "literal",
            SyntaxKind::Name => "name",
            SyntaxKind::FieldAccess => "field access",
            SyntaxKind::MethodCall => "method call",
            SyntaxKind::ObjectCreation => "object creation",
            SyntaxKind::ArrayCreation => "array creation",
            SyntaxKind::ArrayInitializer => "array initializer",
            SyntaxKind::ArrayAccess => "array access",
            SyntaxKind::Assignment => "assignment",
            SyntaxKind::Binary => "binary expression",
            SyntaxKind::Unary => "unary expression",
            SyntaxKind::Conditional => "conditional expression",
            SyntaxKind::Cast => "cast",
            SyntaxKind::InstanceOf => "'instanceof' expression",
            SyntaxKind::This => "'this'",
            SyntaxKind::Parenthesized => "parenthesized expression",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::Le
                | BinaryOp::Ge
                | BinaryOp::Eq
                | BinaryOp::Ne
        )
    }

    /// `&&` and `||` evaluate their right operand conditionally.
    pub const fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
}

impl AssignOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
        }
    }

    pub const fn is_prefix(self) -> bool {
        !matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }

    pub const fn has_side_effect(self) -> bool {
        matches!(
            self,
            UnaryOp::PreIncrement
                | UnaryOp::PreDecrement
                | UnaryOp::PostIncrement
                | UnaryOp::PostDecrement
        )
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Per-kind payload of a source node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum NodeData {
    CompilationUnit {
        #[serde(default)]
        package: Option<String>,
        #[serde(default)]
        imports: Vec<String>,
        types: Vec<NodeIndex>,
    },
    ClassDeclaration {
        name: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        type_params: Vec<NodeIndex>,
        #[serde(default)]
        extends: Option<NodeIndex>,
        #[serde(default)]
        implements: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    },
    InterfaceDeclaration {
        name: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        type_params: Vec<NodeIndex>,
        #[serde(default)]
        extends: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    },
    MethodDeclaration {
        name: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        annotations: Vec<String>,
        #[serde(default)]
        type_params: Vec<NodeIndex>,
        params: Vec<NodeIndex>,
        return_type: NodeIndex,
        #[serde(default)]
        body: Option<NodeIndex>,
    },
    ConstructorDeclaration {
        name: String,
        #[serde(default)]
        modifiers: Modifiers,
        params: Vec<NodeIndex>,
        body: NodeIndex,
    },
    FieldDeclaration {
        #[serde(default)]
        modifiers: Modifiers,
        ty: NodeIndex,
        declarators: Vec<NodeIndex>,
    },
    VariableDeclarator {
        name: String,
        /// C-style array dimensions written after the name (`int a[]`).
        #[serde(default)]
        dims: u32,
        #[serde(default)]
        init: Option<NodeIndex>,
    },
    Parameter {
        name: String,
        #[serde(default)]
        modifiers: Modifiers,
        ty: NodeIndex,
        #[serde(default, skip_serializing_if = "is_false")]
        varargs: bool,
    },
    TypeParameter {
        name: String,
        #[serde(default)]
        bounds: Vec<NodeIndex>,
    },
    InitializerBlock {
        #[serde(default)]
        is_static: bool,
        body: NodeIndex,
    },

    PrimitiveType {
        primitive: PrimitiveType,
    },
    ClassType {
        name: String,
        #[serde(default)]
        args: Vec<NodeIndex>,
    },
    ArrayType {
        element: NodeIndex,
    },
    IntersectionType {
        bounds: Vec<NodeIndex>,
    },

    Block {
        statements: Vec<NodeIndex>,
    },
    LocalVariableDeclaration {
        #[serde(default)]
        modifiers: Modifiers,
        ty: NodeIndex,
        declarators: Vec<NodeIndex>,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    IfStatement {
        condition: NodeIndex,
        then_branch: NodeIndex,
        #[serde(default)]
        else_branch: Option<NodeIndex>,
    },
    WhileStatement {
        condition: NodeIndex,
        body: NodeIndex,
    },
    DoStatement {
        body: NodeIndex,
        condition: NodeIndex,
    },
    ForStatement {
        #[serde(default)]
        init: Vec<NodeIndex>,
        #[serde(default)]
        condition: Option<NodeIndex>,
        #[serde(default)]
        update: Vec<NodeIndex>,
        body: NodeIndex,
    },
    ForEachStatement {
        /// A `Parameter` node naming the loop variable.
        variable: NodeIndex,
        iterable: NodeIndex,
        body: NodeIndex,
    },
    SwitchStatement {
        selector: NodeIndex,
        cases: Vec<NodeIndex>,
    },
    SwitchCase {
        /// Empty for `default:`.
        #[serde(default)]
        labels: Vec<NodeIndex>,
        statements: Vec<NodeIndex>,
    },
    ReturnStatement {
        #[serde(default)]
        value: Option<NodeIndex>,
    },
    BreakStatement {
        #[serde(default)]
        label: Option<String>,
    },
    ContinueStatement {
        #[serde(default)]
        label: Option<String>,
    },
    ThrowStatement {
        value: NodeIndex,
    },
    EmptyStatement {},
    LabeledStatement {
        label: String,
        body: NodeIndex,
    },
    SynchronizedStatement {
        lock: NodeIndex,
        body: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        #[serde(default)]
        catches: Vec<NodeIndex>,
        #[serde(default)]
        finally: Option<NodeIndex>,
    },
    CatchClause {
        parameter: NodeIndex,
        body: NodeIndex,
    },

    Literal {
        literal: LiteralKind,
        /// Literal text as written, without quotes for strings and chars.
        value: String,
    },
    Name {
        name: String,
    },
    FieldAccess {
        target: NodeIndex,
        name: String,
    },
    MethodCall {
        #[serde(default)]
        target: Option<NodeIndex>,
        name: String,
        #[serde(default)]
        type_args: Vec<NodeIndex>,
        args: Vec<NodeIndex>,
    },
    ObjectCreation {
        ty: NodeIndex,
        args: Vec<NodeIndex>,
    },
    ArrayCreation {
        element: NodeIndex,
        /// Dimension expressions (`new int[n][m]`).
        #[serde(default)]
        dims: Vec<NodeIndex>,
        /// Trailing empty dimensions (`new int[n][]`).
        #[serde(default)]
        extra_dims: u32,
        #[serde(default)]
        initializer: Option<NodeIndex>,
    },
    ArrayInitializer {
        elements: Vec<NodeIndex>,
    },
    ArrayAccess {
        array: NodeIndex,
        index: NodeIndex,
    },
    Assignment {
        op: AssignOp,
        target: NodeIndex,
        value: NodeIndex,
    },
    Binary {
        op: BinaryOp,
        left: NodeIndex,
        right: NodeIndex,
    },
    Unary {
        op: UnaryOp,
        operand: NodeIndex,
    },
    Conditional {
        condition: NodeIndex,
        then_value: NodeIndex,
        else_value: NodeIndex,
    },
    Cast {
        ty: NodeIndex,
        expression: NodeIndex,
    },
    InstanceOf {
        expression: NodeIndex,
        ty: NodeIndex,
    },
    This {},
    Parenthesized {
        expression: NodeIndex,
    },
}

impl NodeData {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeData::CompilationUnit { .. } => SyntaxKind::CompilationUnit,
            NodeData::ClassDeclaration { .. } => SyntaxKind::ClassDeclaration,
            NodeData::InterfaceDeclaration { .. } => SyntaxKind::InterfaceDeclaration,
            NodeData::MethodDeclaration { .. } => SyntaxKind::MethodDeclaration,
            NodeData::ConstructorDeclaration { .. } => SyntaxKind::ConstructorDeclaration,
            NodeData::FieldDeclaration { .. } => SyntaxKind::FieldDeclaration,
            NodeData::VariableDeclarator { .. } => SyntaxKind::VariableDeclarator,
            NodeData::Parameter { .. } => SyntaxKind::Parameter,
            NodeData::TypeParameter { .. } => SyntaxKind::TypeParameter,
            NodeData::InitializerBlock { .. } => SyntaxKind::InitializerBlock,
            NodeData::PrimitiveType { .. } => SyntaxKind::PrimitiveType,
            NodeData::ClassType { .. } => SyntaxKind::ClassType,
            NodeData::ArrayType { .. } => SyntaxKind::ArrayType,
            NodeData::IntersectionType { .. } => SyntaxKind::IntersectionType,
            NodeData::Block { .. } => SyntaxKind::Block,
            NodeData::LocalVariableDeclaration { .. } => SyntaxKind::LocalVariableDeclaration,
            NodeData::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            NodeData::IfStatement { .. } => SyntaxKind::IfStatement,
            NodeData::WhileStatement { .. } => SyntaxKind::WhileStatement,
            NodeData::DoStatement { .. } => SyntaxKind::DoStatement,
            NodeData::ForStatement { .. } => SyntaxKind::ForStatement,
            NodeData::ForEachStatement { .. } => SyntaxKind::ForEachStatement,
            NodeData::SwitchStatement { .. } => SyntaxKind::SwitchStatement,
            NodeData::SwitchCase { .. } => SyntaxKind::SwitchCase,
            NodeData::ReturnStatement { .. } => SyntaxKind::ReturnStatement,
            NodeData::BreakStatement { .. } => SyntaxKind::BreakStatement,
            NodeData::ContinueStatement { .. } => SyntaxKind::ContinueStatement,
            NodeData::ThrowStatement { .. } => SyntaxKind::ThrowStatement,
            NodeData::EmptyStatement {} => SyntaxKind::EmptyStatement,
            NodeData::LabeledStatement { .. } => SyntaxKind::LabeledStatement,
            NodeData::SynchronizedStatement { .. } => SyntaxKind::SynchronizedStatement,
            NodeData::TryStatement { .. } => SyntaxKind::TryStatement,
            NodeData::CatchClause { .. } => SyntaxKind::CatchClause,
            NodeData::Literal { .. } => SyntaxKind::Literal,
            NodeData::Name { .. } => SyntaxKind::Name,
            NodeData::FieldAccess { .. } => SyntaxKind::FieldAccess,
            NodeData::MethodCall { .. } => SyntaxKind::MethodCall,
            NodeData::ObjectCreation { .. } => SyntaxKind::ObjectCreation,
            NodeData::ArrayCreation { .. } => SyntaxKind::ArrayCreation,
            NodeData::ArrayInitializer { .. } => SyntaxKind::ArrayInitializer,
            NodeData::ArrayAccess { .. } => SyntaxKind::ArrayAccess,
            NodeData::Assignment { .. } => SyntaxKind::Assignment,
            NodeData::Binary { .. } => SyntaxKind::Binary,
            NodeData::Unary { .. } => SyntaxKind::Unary,
            NodeData::Conditional { .. } => SyntaxKind::Conditional,
            NodeData::Cast { .. } => SyntaxKind::Cast,
            NodeData::InstanceOf { .. } => SyntaxKind::InstanceOf,
            NodeData::This {} => SyntaxKind::This,
            NodeData::Parenthesized { .. } => SyntaxKind::Parenthesized,
        }
    }

    /// Child nodes in source order.
    pub fn children(&self) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeData::CompilationUnit { types, .. } => out.extend(types.iter().copied()),
            NodeData::ClassDeclaration {
                type_params,
                extends,
                implements,
                members,
                ..
            } => {
                out.extend(type_params.iter().copied());
                out.extend(extends.iter().copied());
                out.extend(implements.iter().copied());
                out.extend(members.iter().copied());
            }
            NodeData::InterfaceDeclaration {
                type_params,
                extends,
                members,
                ..
            } => {
                out.extend(type_params.iter().copied());
                out.extend(extends.iter().copied());
                out.extend(members.iter().copied());
            }
            NodeData::MethodDeclaration {
                type_params,
                params,
                return_type,
                body,
                ..
            } => {
                out.extend(type_params.iter().copied());
                out.push(*return_type);
                out.extend(params.iter().copied());
                out.extend(body.iter().copied());
            }
            NodeData::ConstructorDeclaration { params, body, .. } => {
                out.extend(params.iter().copied());
                out.push(*body);
            }
            NodeData::FieldDeclaration {
                ty, declarators, ..
            }
            | NodeData::LocalVariableDeclaration {
                ty, declarators, ..
            } => {
                out.push(*ty);
                out.extend(declarators.iter().copied());
            }
            NodeData::VariableDeclarator { init, .. } => out.extend(init.iter().copied()),
            NodeData::Parameter { ty, .. } => out.push(*ty),
            NodeData::TypeParameter { bounds, .. } => out.extend(bounds.iter().copied()),
            NodeData::InitializerBlock { body, .. } => out.push(*body),
            NodeData::PrimitiveType { .. } => {}
            NodeData::ClassType { args, .. } => out.extend(args.iter().copied()),
            NodeData::ArrayType { element } => out.push(*element),
            NodeData::IntersectionType { bounds } => out.extend(bounds.iter().copied()),
            NodeData::Block { statements } => out.extend(statements.iter().copied()),
            NodeData::ExpressionStatement { expression } => out.push(*expression),
            NodeData::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(*condition);
                out.push(*then_branch);
                out.extend(else_branch.iter().copied());
            }
            NodeData::WhileStatement { condition, body } => {
                out.push(*condition);
                out.push(*body);
            }
            NodeData::DoStatement { body, condition } => {
                out.push(*body);
                out.push(*condition);
            }
            NodeData::ForStatement {
                init,
                condition,
                update,
                body,
            } => {
                out.extend(init.iter().copied());
                out.extend(condition.iter().copied());
                out.extend(update.iter().copied());
                out.push(*body);
            }
            NodeData::ForEachStatement {
                variable,
                iterable,
                body,
            } => {
                out.push(*variable);
                out.push(*iterable);
                out.push(*body);
            }
            NodeData::SwitchStatement { selector, cases } => {
                out.push(*selector);
                out.extend(cases.iter().copied());
            }
            NodeData::SwitchCase { labels, statements } => {
                out.extend(labels.iter().copied());
                out.extend(statements.iter().copied());
            }
            NodeData::ReturnStatement { value } => out.extend(value.iter().copied()),
            NodeData::BreakStatement { .. }
            | NodeData::ContinueStatement { .. }
            | NodeData::EmptyStatement {} => {}
            NodeData::ThrowStatement { value } => out.push(*value),
            NodeData::LabeledStatement { body, .. } => out.push(*body),
            NodeData::SynchronizedStatement { lock, body } => {
                out.push(*lock);
                out.push(*body);
            }
            NodeData::TryStatement {
                block,
                catches,
                finally,
            } => {
                out.push(*block);
                out.extend(catches.iter().copied());
                out.extend(finally.iter().copied());
            }
            NodeData::CatchClause { parameter, body } => {
                out.push(*parameter);
                out.push(*body);
            }
            NodeData::Literal { .. } | NodeData::Name { .. } | NodeData::This {} => {}
            NodeData::FieldAccess { target, .. } => out.push(*target),
            NodeData::MethodCall {
                target,
                type_args,
                args,
                ..
            } => {
                out.extend(target.iter().copied());
                out.extend(type_args.iter().copied());
                out.extend(args.iter().copied());
            }
            NodeData::ObjectCreation { ty, args } => {
                out.push(*ty);
                out.extend(args.iter().copied());
            }
            NodeData::ArrayCreation {
                element,
                dims,
                initializer,
                ..
            } => {
                out.push(*element);
                out.extend(dims.iter().copied());
                out.extend(initializer.iter().copied());
            }
            NodeData::ArrayInitializer { elements } => out.extend(elements.iter().copied()),
            NodeData::ArrayAccess { array, index } => {
                out.push(*array);
                out.push(*index);
            }
            NodeData::Assignment { target, value, .. } => {
                out.push(*target);
                out.push(*value);
            }
            NodeData::Binary { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            NodeData::Unary { operand, .. } => out.push(*operand),
            NodeData::Conditional {
                condition,
                then_value,
                else_value,
            } => {
                out.push(*condition);
                out.push(*then_value);
                out.push(*else_value);
            }
            NodeData::Cast { ty, expression } => {
                out.push(*ty);
                out.push(*expression);
            }
            NodeData::InstanceOf { expression, ty } => {
                out.push(*expression);
                out.push(*ty);
            }
            NodeData::Parenthesized { expression } => out.push(*expression),
        }
        out
    }

    /// Declared name of declarations and simple names.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeData::ClassDeclaration { name, .. }
            | NodeData::InterfaceDeclaration { name, .. }
            | NodeData::MethodDeclaration { name, .. }
            | NodeData::ConstructorDeclaration { name, .. }
            | NodeData::VariableDeclarator { name, .. }
            | NodeData::Parameter { name, .. }
            | NodeData::TypeParameter { name, .. }
            | NodeData::Name { name }
            | NodeData::ClassType { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            NodeData::ClassDeclaration { modifiers, .. }
            | NodeData::InterfaceDeclaration { modifiers, .. }
            | NodeData::MethodDeclaration { modifiers, .. }
            | NodeData::ConstructorDeclaration { modifiers, .. }
            | NodeData::FieldDeclaration { modifiers, .. }
            | NodeData::Parameter { modifiers, .. }
            | NodeData::LocalVariableDeclaration { modifiers, .. } => *modifiers,
            NodeData::InitializerBlock { is_static: true, .. } => Modifiers::STATIC,
            _ => Modifiers::empty(),
        }
    }

    /// Members of a class or interface body.
    pub fn members(&self) -> &[NodeIndex] {
        match self {
            NodeData::ClassDeclaration { members, .. }
            | NodeData::InterfaceDeclaration { members, .. } => members,
            _ => &[],
        }
    }
}
