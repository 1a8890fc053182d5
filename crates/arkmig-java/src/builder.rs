//! Incremental construction of source trees.
//!
//! Front ends that link the engine directly, the fixture module and tests
//! build trees through `TreeBuilder`. Children must be added before their
//! parents; `finish` validates the arena like JSON loading does.
//!
//! Spans are attached with [`TreeBuilder::locate`], which searches the unit
//! text for a snippet. Nodes left unlocated inherit the union of their
//! children's spans when the tree is finished.

use crate::modifiers::Modifiers;
use crate::node::{AssignOp, BinaryOp, LiteralKind, NodeData, NodeIndex, UnaryOp};
use crate::types::{JavaType, PrimitiveType};
use crate::unit::{SourceNode, SourceUnit, TreeError};
use arkmig_common::position::{LineMap, Position, Span};

pub struct TreeBuilder {
    file_name: String,
    text: String,
    line_map: LineMap,
    nodes: Vec<SourceNode>,
}

impl TreeBuilder {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        TreeBuilder {
            file_name: file_name.into(),
            line_map: LineMap::build(&text),
            text,
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        let idx = NodeIndex::from_usize(self.nodes.len());
        self.nodes.push(SourceNode::new(data));
        idx
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn data_mut(&mut self, idx: NodeIndex) -> Option<&mut NodeData> {
        self.nodes.get_mut(idx.index()).map(|n| &mut n.data)
    }

    /// Attach the resolved type computed by a front end.
    pub fn typed(&mut self, idx: NodeIndex, ty: JavaType) -> NodeIndex {
        if let Some(node) = self.nodes.get_mut(idx.index()) {
            node.resolved_type = Some(ty);
        }
        idx
    }

    /// Set an explicit position without a span.
    pub fn at(&mut self, idx: NodeIndex, line: u32, column: u32) -> NodeIndex {
        if let Some(node) = self.nodes.get_mut(idx.index()) {
            node.pos = Position::new(line, column);
        }
        idx
    }

    /// Span the first occurrence of `snippet` in the unit text.
    pub fn locate(&mut self, idx: NodeIndex, snippet: &str) -> NodeIndex {
        self.locate_nth(idx, snippet, 0)
    }

    /// Span the `n`-th (0-based) occurrence of `snippet`.
    pub fn locate_nth(&mut self, idx: NodeIndex, snippet: &str, n: usize) -> NodeIndex {
        let start = self
            .text
            .match_indices(snippet)
            .nth(n)
            .map(|(offset, _)| offset);
        if let Some(start) = start {
            self.set_span(idx, start, start + snippet.len());
        }
        idx
    }

    /// Span the first occurrence of `snippet` after the first `marker`.
    pub fn locate_after(&mut self, idx: NodeIndex, snippet: &str, marker: &str) -> NodeIndex {
        let start = self.text.find(marker).and_then(|from| {
            self.text[from..]
                .find(snippet)
                .map(|offset| from + offset)
        });
        if let Some(start) = start {
            self.set_span(idx, start, start + snippet.len());
        }
        idx
    }

    fn set_span(&mut self, idx: NodeIndex, start: usize, end: usize) {
        let span = Span::new(start as u32, end as u32);
        let pos = self.line_map.offset_to_position(span.start, &self.text);
        if let Some(node) = self.nodes.get_mut(idx.index()) {
            node.span = span;
            node.pos = pos;
        }
    }

    /// Fill in inherited spans and validate the tree.
    pub fn finish(mut self, root: NodeIndex) -> Result<SourceUnit, TreeError> {
        for i in 0..self.nodes.len() {
            if !self.nodes[i].span.is_empty() {
                continue;
            }
            let mut union: Option<Span> = None;
            for child in self.nodes[i].data.children() {
                let Some(child_span) = self.nodes.get(child.index()).map(|n| n.span) else {
                    continue;
                };
                if child_span.is_empty() {
                    continue;
                }
                union = Some(match union {
                    Some(span) => Span::new(
                        span.start.min(child_span.start),
                        span.end.max(child_span.end),
                    ),
                    None => child_span,
                });
            }
            if let Some(span) = union {
                self.nodes[i].span = span;
                if self.nodes[i].pos.is_unknown() {
                    self.nodes[i].pos = self.line_map.offset_to_position(span.start, &self.text);
                }
            }
        }
        SourceUnit::new(self.file_name, self.text, self.nodes, root)
    }

    // Types

    pub fn primitive(&mut self, primitive: PrimitiveType) -> NodeIndex {
        self.add(NodeData::PrimitiveType { primitive })
    }

    pub fn void(&mut self) -> NodeIndex {
        self.primitive(PrimitiveType::Void)
    }

    pub fn class_type(&mut self, name: &str) -> NodeIndex {
        self.add(NodeData::ClassType {
            name: name.to_string(),
            args: Vec::new(),
        })
    }

    pub fn generic_type(&mut self, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ClassType {
            name: name.to_string(),
            args,
        })
    }

    pub fn array_type(&mut self, element: NodeIndex) -> NodeIndex {
        self.add(NodeData::ArrayType { element })
    }

    pub fn intersection_type(&mut self, bounds: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::IntersectionType { bounds })
    }

    // Expressions

    pub fn literal(&mut self, literal: LiteralKind, value: &str) -> NodeIndex {
        self.add(NodeData::Literal {
            literal,
            value: value.to_string(),
        })
    }

    pub fn int(&mut self, value: i64) -> NodeIndex {
        self.literal(LiteralKind::Int, &value.to_string())
    }

    pub fn double(&mut self, value: &str) -> NodeIndex {
        self.literal(LiteralKind::Double, value)
    }

    pub fn string(&mut self, value: &str) -> NodeIndex {
        self.literal(LiteralKind::String, value)
    }

    pub fn boolean(&mut self, value: bool) -> NodeIndex {
        self.literal(LiteralKind::Boolean, if value { "true" } else { "false" })
    }

    pub fn null(&mut self) -> NodeIndex {
        self.literal(LiteralKind::Null, "null")
    }

    pub fn name(&mut self, name: &str) -> NodeIndex {
        self.add(NodeData::Name {
            name: name.to_string(),
        })
    }

    pub fn this(&mut self) -> NodeIndex {
        self.add(NodeData::This {})
    }

    pub fn field(&mut self, target: NodeIndex, name: &str) -> NodeIndex {
        self.add(NodeData::FieldAccess {
            target,
            name: name.to_string(),
        })
    }

    pub fn call(&mut self, target: Option<NodeIndex>, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::MethodCall {
            target,
            name: name.to_string(),
            type_args: Vec::new(),
            args,
        })
    }

    pub fn new_object(&mut self, ty: NodeIndex, args: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ObjectCreation { ty, args })
    }

    pub fn new_array(&mut self, element: NodeIndex, dims: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ArrayCreation {
            element,
            dims,
            extra_dims: 0,
            initializer: None,
        })
    }

    pub fn array_init(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ArrayInitializer { elements })
    }

    pub fn index(&mut self, array: NodeIndex, index: NodeIndex) -> NodeIndex {
        self.add(NodeData::ArrayAccess { array, index })
    }

    pub fn assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        self.assign_op(AssignOp::Assign, target, value)
    }

    pub fn assign_op(&mut self, op: AssignOp, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        self.add(NodeData::Assignment { op, target, value })
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.add(NodeData::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeIndex) -> NodeIndex {
        self.add(NodeData::Unary { op, operand })
    }

    pub fn conditional(&mut self, condition: NodeIndex, then_value: NodeIndex, else_value: NodeIndex) -> NodeIndex {
        self.add(NodeData::Conditional {
            condition,
            then_value,
            else_value,
        })
    }

    pub fn cast(&mut self, ty: NodeIndex, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Cast { ty, expression })
    }

    pub fn instance_of(&mut self, expression: NodeIndex, ty: NodeIndex) -> NodeIndex {
        self.add(NodeData::InstanceOf { expression, ty })
    }

    pub fn paren(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::Parenthesized { expression })
    }

    // Statements

    pub fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::Block { statements })
    }

    pub fn expr_stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add(NodeData::ExpressionStatement { expression })
    }

    /// `name = value;` as a statement.
    pub fn assign_stmt(&mut self, name: &str, value: NodeIndex) -> NodeIndex {
        let target = self.name(name);
        let assign = self.assign(target, value);
        self.expr_stmt(assign)
    }

    pub fn declarator(&mut self, name: &str, init: Option<NodeIndex>) -> NodeIndex {
        self.add(NodeData::VariableDeclarator {
            name: name.to_string(),
            dims: 0,
            init,
        })
    }

    pub fn local(&mut self, ty: NodeIndex, declarators: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::LocalVariableDeclaration {
            modifiers: Modifiers::empty(),
            ty,
            declarators,
        })
    }

    /// Single-declarator local variable.
    pub fn local_var(&mut self, ty: NodeIndex, name: &str, init: Option<NodeIndex>) -> NodeIndex {
        let declarator = self.declarator(name, init);
        self.local(ty, vec![declarator])
    }

    pub fn if_stmt(&mut self, condition: NodeIndex, then_branch: NodeIndex, else_branch: Option<NodeIndex>) -> NodeIndex {
        self.add(NodeData::IfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn while_stmt(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeData::WhileStatement { condition, body })
    }

    pub fn do_stmt(&mut self, body: NodeIndex, condition: NodeIndex) -> NodeIndex {
        self.add(NodeData::DoStatement { body, condition })
    }

    pub fn for_stmt(
        &mut self,
        init: Vec<NodeIndex>,
        condition: Option<NodeIndex>,
        update: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeData::ForStatement {
            init,
            condition,
            update,
            body,
        })
    }

    pub fn for_each(&mut self, variable: NodeIndex, iterable: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeData::ForEachStatement {
            variable,
            iterable,
            body,
        })
    }

    pub fn switch_stmt(&mut self, selector: NodeIndex, cases: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::SwitchStatement { selector, cases })
    }

    pub fn case(&mut self, labels: Vec<NodeIndex>, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::SwitchCase { labels, statements })
    }

    pub fn ret(&mut self, value: Option<NodeIndex>) -> NodeIndex {
        self.add(NodeData::ReturnStatement { value })
    }

    pub fn brk(&mut self, label: Option<&str>) -> NodeIndex {
        self.add(NodeData::BreakStatement {
            label: label.map(str::to_string),
        })
    }

    pub fn cont(&mut self, label: Option<&str>) -> NodeIndex {
        self.add(NodeData::ContinueStatement {
            label: label.map(str::to_string),
        })
    }

    pub fn throw(&mut self, value: NodeIndex) -> NodeIndex {
        self.add(NodeData::ThrowStatement { value })
    }

    pub fn empty(&mut self) -> NodeIndex {
        self.add(NodeData::EmptyStatement {})
    }

    pub fn labeled(&mut self, label: &str, body: NodeIndex) -> NodeIndex {
        self.add(NodeData::LabeledStatement {
            label: label.to_string(),
            body,
        })
    }

    // Declarations

    pub fn param(&mut self, ty: NodeIndex, name: &str) -> NodeIndex {
        self.add(NodeData::Parameter {
            name: name.to_string(),
            modifiers: Modifiers::empty(),
            ty,
            varargs: false,
        })
    }

    pub fn type_param(&mut self, name: &str, bounds: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::TypeParameter {
            name: name.to_string(),
            bounds,
        })
    }

    pub fn method(
        &mut self,
        modifiers: Modifiers,
        name: &str,
        params: Vec<NodeIndex>,
        return_type: NodeIndex,
        body: Option<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::MethodDeclaration {
            name: name.to_string(),
            modifiers,
            annotations: Vec::new(),
            type_params: Vec::new(),
            params,
            return_type,
            body,
        })
    }

    pub fn constructor(
        &mut self,
        modifiers: Modifiers,
        name: &str,
        params: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeData::ConstructorDeclaration {
            name: name.to_string(),
            modifiers,
            params,
            body,
        })
    }

    /// Single-declarator field.
    pub fn field_decl(
        &mut self,
        modifiers: Modifiers,
        ty: NodeIndex,
        name: &str,
        init: Option<NodeIndex>,
    ) -> NodeIndex {
        let declarator = self.declarator(name, init);
        self.add(NodeData::FieldDeclaration {
            modifiers,
            ty,
            declarators: vec![declarator],
        })
    }

    pub fn initializer(&mut self, is_static: bool, body: NodeIndex) -> NodeIndex {
        self.add(NodeData::InitializerBlock { is_static, body })
    }

    pub fn class_decl(
        &mut self,
        modifiers: Modifiers,
        name: &str,
        extends: Option<NodeIndex>,
        implements: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::ClassDeclaration {
            name: name.to_string(),
            modifiers,
            type_params: Vec::new(),
            extends,
            implements,
            members,
        })
    }

    pub fn interface_decl(
        &mut self,
        modifiers: Modifiers,
        name: &str,
        extends: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add(NodeData::InterfaceDeclaration {
            name: name.to_string(),
            modifiers,
            type_params: Vec::new(),
            extends,
            members,
        })
    }

    pub fn compilation_unit(&mut self, package: Option<&str>, imports: &[&str], types: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeData::CompilationUnit {
            package: package.map(str::to_string),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            types,
        })
    }

    /// Attach type parameters to a class, interface or method declaration.
    pub fn with_type_params(&mut self, decl: NodeIndex, params: Vec<NodeIndex>) -> NodeIndex {
        if let Some(
            NodeData::ClassDeclaration { type_params, .. }
            | NodeData::InterfaceDeclaration { type_params, .. }
            | NodeData::MethodDeclaration { type_params, .. },
        ) = self.data_mut(decl)
        {
            *type_params = params;
        }
        decl
    }

    /// Add an annotation such as `Override` to a method declaration.
    pub fn annotate(&mut self, method: NodeIndex, annotation: &str) -> NodeIndex {
        if let Some(NodeData::MethodDeclaration { annotations, .. }) = self.data_mut(method) {
            annotations.push(annotation.to_string());
        }
        method
    }
}
