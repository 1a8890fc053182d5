//! ArkTS target tree.
//!
//! Rules build `TargetNode` values directly. Every node owns its children;
//! there are no arena indices, so a finished tree is `'static + Send + Sync`
//! and can be handed to an emitter on any thread.
//!
//! Types live in their own small enum (`TargetType`) because they appear in
//! many positions (annotations, casts, `new` expressions, type arguments).
//! A lowered Java type node travels through the dispatcher wrapped in
//! `TargetNode::Type`.

use std::fmt;

/// ArkTS type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// `string`, `int`, `Array<T>`, `Map<K, V>`
    Named { name: String, args: Vec<Self> },
    /// `T[]`
    Array(Box<Self>),
    /// `A & B`
    Intersection(Vec<Self>),
    /// `void`
    Void,
}

impl TargetType {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn object() -> Self {
        Self::named("Object")
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(element) => match element.as_ref() {
                // `(A & B)[]`, not `A & B[]`
                Self::Intersection(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Self::Intersection(bounds) => {
                for (i, bound) in bounds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    write!(f, "{bound}")?;
                }
                Ok(())
            }
            Self::Void => f.write_str("void"),
        }
    }
}

/// Declaration modifiers, printed in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Export,
    Private,
    Protected,
    Static,
    Abstract,
    Final,
    Readonly,
}

impl Modifier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Static => "static",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::Readonly => "readonly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// Syntactic position a placeholder has to fit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderFlavor {
    Statement,
    Expression,
    Member,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TargetType,
    /// `...name: T[]`
    pub rest: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TargetType) -> Self {
        Self {
            name: name.into(),
            ty,
            rest: false,
        }
    }

    pub fn rest(name: impl Into<String>, ty: TargetType) -> Self {
        Self {
            name: name.into(),
            ty,
            rest: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraint: Option<TargetType>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, constraint: Option<TargetType>) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }
}

/// ArkTS output node
#[derive(Debug, Clone, PartialEq)]
pub enum TargetNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// `42`, `2.5`, `2.5f`
    NumericLiteral(String),

    /// `"text"`, kept with its original escapes
    StringLiteral(String),

    /// `c'a'`
    CharLiteral(String),

    BooleanLiteral(bool),

    NullLiteral,

    // =========================================================================
    // Identifiers
    // =========================================================================
    Identifier(String),

    This,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// `left op right`
    Binary {
        left: Box<Self>,
        operator: &'static str,
        right: Box<Self>,
    },

    /// `!x`, `-x`, `++x`
    PrefixUnary {
        operator: &'static str,
        operand: Box<Self>,
    },

    /// `x++`, `x--`
    PostfixUnary {
        operand: Box<Self>,
        operator: &'static str,
    },

    /// `target op value` for `=`, `+=`, ...
    Assign {
        target: Box<Self>,
        operator: &'static str,
        value: Box<Self>,
    },

    /// `callee<T>(args)`
    Call {
        callee: Box<Self>,
        type_args: Vec<TargetType>,
        arguments: Vec<Self>,
    },

    /// `new T(args)`
    New {
        class: TargetType,
        arguments: Vec<Self>,
    },

    /// `new T[n][m]`, with `extra_dims` trailing `[]` pairs
    NewArray {
        element: TargetType,
        dims: Vec<Self>,
        extra_dims: u32,
    },

    /// `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// `object[index]`
    ElementAccess { object: Box<Self>, index: Box<Self> },

    /// `cond ? a : b`
    Conditional {
        condition: Box<Self>,
        when_true: Box<Self>,
        when_false: Box<Self>,
    },

    Parenthesized(Box<Self>),

    /// `[a, b, c]`
    ArrayLiteral(Vec<Self>),

    /// `expr as T`
    As { expression: Box<Self>, ty: TargetType },

    /// `expr instanceof T`
    InstanceOf { expression: Box<Self>, ty: TargetType },

    // =========================================================================
    // Statements
    // =========================================================================
    /// `let x: T = init;`
    VarDecl {
        kind: VarKind,
        name: String,
        ty: Option<TargetType>,
        initializer: Option<Box<Self>>,
    },

    ExpressionStatement(Box<Self>),

    Return(Option<Box<Self>>),

    /// `if (c) { ... } else ...`; `else_branch` is a `Block` or another `If`.
    If {
        condition: Box<Self>,
        then_branch: Box<Self>,
        else_branch: Option<Box<Self>>,
    },

    Block(Vec<Self>),

    Empty,

    While { condition: Box<Self>, body: Box<Self> },

    DoWhile { body: Box<Self>, condition: Box<Self> },

    /// `for (init; condition; update) body`; `init` holds `VarDecl`s or
    /// expression statements.
    For {
        init: Vec<Self>,
        condition: Option<Box<Self>>,
        update: Vec<Self>,
        body: Box<Self>,
    },

    /// `for (let x of iterable) body`; the loop variable cannot carry a type
    /// annotation.
    ForOf {
        kind: VarKind,
        name: String,
        iterable: Box<Self>,
        body: Box<Self>,
    },

    Switch {
        discriminant: Box<Self>,
        cases: Vec<Self>,
    },

    /// One `case` group. Empty `tests` is the `default:` clause; several
    /// tests print as stacked labels sharing one statement list.
    Case {
        tests: Vec<Self>,
        statements: Vec<Self>,
    },

    Throw(Box<Self>),

    Break(Option<String>),

    Continue(Option<String>),

    Labeled { label: String, body: Box<Self> },

    // =========================================================================
    // Declarations
    // =========================================================================
    /// A migrated compilation unit
    Module(Vec<Self>),

    /// `import { A, B } from "module";`
    Import { names: Vec<String>, module: String },

    Class {
        modifiers: Vec<Modifier>,
        name: String,
        type_params: Vec<TypeParam>,
        extends: Option<TargetType>,
        implements: Vec<TargetType>,
        members: Vec<Self>,
    },

    Interface {
        modifiers: Vec<Modifier>,
        name: String,
        type_params: Vec<TypeParam>,
        extends: Vec<TargetType>,
        members: Vec<Self>,
    },

    /// Method or interface method signature (`body: None`).
    Method {
        modifiers: Vec<Modifier>,
        name: String,
        type_params: Vec<TypeParam>,
        params: Vec<Param>,
        return_type: TargetType,
        body: Option<Vec<Self>>,
    },

    Constructor {
        modifiers: Vec<Modifier>,
        params: Vec<Param>,
        body: Vec<Self>,
    },

    /// `static readonly X: int = 1;`
    Property {
        modifiers: Vec<Modifier>,
        name: String,
        ty: TargetType,
        initializer: Option<Box<Self>>,
    },

    /// `static { ... }`
    StaticBlock(Vec<Self>),

    // =========================================================================
    // Carriers and passthrough
    // =========================================================================
    /// A lowered type node
    Type(TargetType),

    /// A lowered parameter
    Parameter(Param),

    /// A lowered type parameter
    TypeParameter(TypeParam),

    /// Original Java text kept verbatim in a syntactically valid shell
    Placeholder {
        text: String,
        flavor: PlaceholderFlavor,
    },
}

impl TargetNode {
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::NumericLiteral(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn elem(object: Self, index: Self) -> Self {
        Self::ElementAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn call(callee: Self, arguments: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            arguments,
        }
    }

    /// `object.method(args)`
    pub fn method_call(object: Self, method: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::call(Self::prop(object, method), arguments)
    }

    pub fn binary(left: Self, operator: &'static str, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn assign(target: Self, value: Self) -> Self {
        Self::Assign {
            target: Box::new(target),
            operator: "=",
            value: Box::new(value),
        }
    }

    pub fn as_cast(expression: Self, ty: TargetType) -> Self {
        Self::As {
            expression: Box::new(expression),
            ty,
        }
    }

    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    pub fn ret(value: Option<Self>) -> Self {
        Self::Return(value.map(Box::new))
    }

    pub fn block(statements: Vec<Self>) -> Self {
        Self::Block(statements)
    }

    pub fn const_decl(name: impl Into<String>, ty: Option<TargetType>, init: Self) -> Self {
        Self::VarDecl {
            kind: VarKind::Const,
            name: name.into(),
            ty,
            initializer: Some(Box::new(init)),
        }
    }

    pub fn placeholder(text: impl Into<String>, flavor: PlaceholderFlavor) -> Self {
        Self::Placeholder {
            text: text.into(),
            flavor,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::VarDecl { .. }
                | Self::ExpressionStatement(_)
                | Self::Return(_)
                | Self::If { .. }
                | Self::Block(_)
                | Self::Empty
                | Self::While { .. }
                | Self::DoWhile { .. }
                | Self::For { .. }
                | Self::ForOf { .. }
                | Self::Switch { .. }
                | Self::Throw(_)
                | Self::Break(_)
                | Self::Continue(_)
                | Self::Labeled { .. }
                | Self::Placeholder {
                    flavor: PlaceholderFlavor::Statement,
                    ..
                }
        )
    }

    /// Name of a declaration node
    pub fn decl_name(&self) -> Option<&str> {
        match self {
            Self::Class { name, .. }
            | Self::Interface { name, .. }
            | Self::Method { name, .. }
            | Self::Property { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Pre-order walk over this node and every node nested in it.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Directly nested nodes, in print order.
    pub fn children(&self) -> Vec<&Self> {
        let mut out: Vec<&Self> = Vec::new();
        match self {
            Self::Binary { left, right, .. } => {
                out.push(left);
                out.push(right);
            }
            Self::PrefixUnary { operand, .. } | Self::PostfixUnary { operand, .. } => {
                out.push(operand);
            }
            Self::Assign { target, value, .. } => {
                out.push(target);
                out.push(value);
            }
            Self::Call {
                callee, arguments, ..
            } => {
                out.push(callee);
                out.extend(arguments);
            }
            Self::New { arguments, .. } => out.extend(arguments),
            Self::NewArray { dims, .. } => out.extend(dims),
            Self::PropertyAccess { object, .. } => out.push(object),
            Self::ElementAccess { object, index } => {
                out.push(object);
                out.push(index);
            }
            Self::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                out.push(condition);
                out.push(when_true);
                out.push(when_false);
            }
            Self::Parenthesized(inner)
            | Self::ExpressionStatement(inner)
            | Self::Throw(inner)
            | Self::As {
                expression: inner, ..
            }
            | Self::InstanceOf {
                expression: inner, ..
            }
            | Self::Labeled { body: inner, .. } => out.push(inner),
            Self::ArrayLiteral(items)
            | Self::Block(items)
            | Self::Module(items)
            | Self::StaticBlock(items)
            | Self::Constructor { body: items, .. }
            | Self::Class { members: items, .. }
            | Self::Interface { members: items, .. } => out.extend(items),
            Self::VarDecl { initializer, .. } | Self::Property { initializer, .. } => {
                out.extend(initializer.as_deref());
            }
            Self::Return(value) => out.extend(value.as_deref()),
            Self::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(condition);
                out.push(then_branch);
                out.extend(else_branch.as_deref());
            }
            Self::While { condition, body } => {
                out.push(condition);
                out.push(body);
            }
            Self::DoWhile { body, condition } => {
                out.push(body);
                out.push(condition);
            }
            Self::For {
                init,
                condition,
                update,
                body,
            } => {
                out.extend(init);
                out.extend(condition.as_deref());
                out.extend(update);
                out.push(body);
            }
            Self::ForOf { iterable, body, .. } => {
                out.push(iterable);
                out.push(body);
            }
            Self::Switch {
                discriminant,
                cases,
            } => {
                out.push(discriminant);
                out.extend(cases);
            }
            Self::Case { tests, statements } => {
                out.extend(tests);
                out.extend(statements);
            }
            Self::Method { body, .. } => {
                if let Some(body) = body {
                    out.extend(body);
                }
            }
            Self::NumericLiteral(_)
            | Self::StringLiteral(_)
            | Self::CharLiteral(_)
            | Self::BooleanLiteral(_)
            | Self::NullLiteral
            | Self::Identifier(_)
            | Self::This
            | Self::Empty
            | Self::Break(_)
            | Self::Continue(_)
            | Self::Import { .. }
            | Self::Type(_)
            | Self::Parameter(_)
            | Self::TypeParameter(_)
            | Self::Placeholder { .. } => {}
        }
        out
    }
}
