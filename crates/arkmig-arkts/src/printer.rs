//! Reference ArkTS printer.
//!
//! Walks a `TargetNode` tree and writes ArkTS source. Formatting is fixed
//! (four-space indent, one statement per line, blank lines between top-level
//! items). Parentheses are inserted where operator precedence requires them;
//! parentheses present in the Java source arrive as `Parenthesized` nodes and
//! are printed as-is.

use crate::node::{PlaceholderFlavor, TargetNode, VarKind};

/// Printer state: output buffer and current indentation.
pub struct ArkTsPrinter {
    pub(crate) output: String,
    pub(crate) indent_level: u32,
    pub(crate) indent_str: &'static str,
}

impl ArkTsPrinter {
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    pub const fn with_indent(indent_str: &'static str) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str,
        }
    }

    /// Print one tree to a fresh string.
    pub fn emit_to_string(node: &TargetNode) -> String {
        let mut printer = Self::new();
        printer.emit(node);
        printer.output
    }

    pub fn emit(&mut self, node: &TargetNode) {
        self.emit_node(node);
        if matches!(node, TargetNode::Module(_)) && !self.output.ends_with('\n') {
            self.write_line();
        }
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }

    pub(crate) fn emit_node(&mut self, node: &TargetNode) {
        match node {
            // Literals
            TargetNode::NumericLiteral(value) => self.write(value),
            TargetNode::StringLiteral(value) => {
                self.write("\"");
                self.write(value);
                self.write("\"");
            }
            TargetNode::CharLiteral(value) => {
                self.write("c'");
                self.write(value);
                self.write("'");
            }
            TargetNode::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            TargetNode::NullLiteral => self.write("null"),
            TargetNode::Identifier(name) => self.write(name),
            TargetNode::This => self.write("this"),

            // Expressions
            TargetNode::Binary {
                left,
                operator,
                right,
            } => {
                let prec = binary_precedence(operator);
                self.emit_operand(left, prec);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_operand(right, prec + 1);
            }
            TargetNode::PrefixUnary { operator, operand } => {
                self.write(operator);
                // `- -x` and `+ ++x` must not fuse into one token
                let fuses = matches!(
                    operand.as_ref(),
                    TargetNode::PrefixUnary { operator: inner, .. }
                        if inner.starts_with(&operator[..1])
                );
                if fuses {
                    self.write("(");
                    self.emit_node(operand);
                    self.write(")");
                } else {
                    self.emit_operand(operand, PREC_PREFIX);
                }
            }
            TargetNode::PostfixUnary { operand, operator } => {
                self.emit_operand(operand, PREC_POSTFIX);
                self.write(operator);
            }
            TargetNode::Assign {
                target,
                operator,
                value,
            } => {
                self.emit_operand(target, PREC_MEMBER);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_operand(value, PREC_ASSIGN);
            }
            TargetNode::Call {
                callee,
                type_args,
                arguments,
            } => {
                self.emit_operand(callee, PREC_MEMBER);
                self.emit_type_args(type_args);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            TargetNode::New { class, arguments } => {
                self.write("new ");
                self.write_type(class);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            TargetNode::NewArray {
                element,
                dims,
                extra_dims,
            } => {
                self.write("new ");
                self.write_type(element);
                for dim in dims {
                    self.write("[");
                    self.emit_node(dim);
                    self.write("]");
                }
                for _ in 0..*extra_dims {
                    self.write("[]");
                }
            }
            TargetNode::PropertyAccess { object, property } => {
                self.emit_operand(object, PREC_MEMBER);
                self.write(".");
                self.write(property);
            }
            TargetNode::ElementAccess { object, index } => {
                self.emit_operand(object, PREC_MEMBER);
                self.write("[");
                self.emit_node(index);
                self.write("]");
            }
            TargetNode::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.emit_operand(condition, PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.emit_operand(when_true, PREC_ASSIGN);
                self.write(" : ");
                self.emit_operand(when_false, PREC_CONDITIONAL);
            }
            TargetNode::Parenthesized(inner) => {
                self.write("(");
                self.emit_node(inner);
                self.write(")");
            }
            TargetNode::ArrayLiteral(elements) => {
                self.write("[");
                self.emit_comma_separated(elements);
                self.write("]");
            }
            TargetNode::As { expression, ty } => {
                self.emit_operand(expression, PREC_RELATIONAL);
                self.write(" as ");
                self.write_type(ty);
            }
            TargetNode::InstanceOf { expression, ty } => {
                self.emit_operand(expression, PREC_RELATIONAL);
                self.write(" instanceof ");
                self.write_type(ty);
            }

            // Statements
            TargetNode::VarDecl { .. } => {
                self.emit_var_decl_head(node, true);
                self.write(";");
            }
            TargetNode::ExpressionStatement(expr) => {
                self.emit_node(expr);
                self.write(";");
            }
            TargetNode::Return(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.emit_node(value);
                }
                self.write(";");
            }
            TargetNode::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.emit_node(condition);
                self.write(")");
                self.emit_embedded_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    if matches!(then_branch.as_ref(), TargetNode::Block(_)) {
                        self.write(" ");
                    } else {
                        self.write_line();
                        self.write_indent();
                    }
                    self.write("else");
                    if matches!(else_branch.as_ref(), TargetNode::If { .. }) {
                        self.write(" ");
                        self.emit_node(else_branch);
                    } else {
                        self.emit_embedded_statement(else_branch);
                    }
                }
            }
            TargetNode::Block(statements) => self.emit_block(statements),
            TargetNode::Empty => self.write(";"),
            TargetNode::While { condition, body } => {
                self.write("while (");
                self.emit_node(condition);
                self.write(")");
                self.emit_embedded_statement(body);
            }
            TargetNode::DoWhile { body, condition } => {
                self.write("do");
                self.emit_embedded_statement(body);
                if matches!(body.as_ref(), TargetNode::Block(_)) {
                    self.write(" ");
                } else {
                    self.write_line();
                    self.write_indent();
                }
                self.write("while (");
                self.emit_node(condition);
                self.write(");");
            }
            TargetNode::For {
                init,
                condition,
                update,
                body,
            } => {
                self.write("for (");
                self.emit_for_init(init);
                self.write(";");
                if let Some(condition) = condition {
                    self.write(" ");
                    self.emit_node(condition);
                }
                self.write(";");
                if !update.is_empty() {
                    self.write(" ");
                    self.emit_comma_separated(update);
                }
                self.write(")");
                self.emit_embedded_statement(body);
            }
            TargetNode::ForOf {
                kind,
                name,
                iterable,
                body,
            } => {
                self.write("for (");
                self.write(kind.as_str());
                self.write(" ");
                self.write(name);
                self.write(" of ");
                self.emit_node(iterable);
                self.write(")");
                self.emit_embedded_statement(body);
            }
            TargetNode::Switch {
                discriminant,
                cases,
            } => {
                self.write("switch (");
                self.emit_node(discriminant);
                self.write(") {");
                self.write_line();
                self.increase_indent();
                for case in cases {
                    self.emit_switch_case(case);
                }
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            TargetNode::Case { .. } => self.emit_switch_case(node),
            TargetNode::Throw(value) => {
                self.write("throw ");
                self.emit_node(value);
                self.write(";");
            }
            TargetNode::Break(label) => self.emit_jump("break", label.as_deref()),
            TargetNode::Continue(label) => self.emit_jump("continue", label.as_deref()),
            TargetNode::Labeled { label, body } => {
                self.write(label);
                self.write(": ");
                self.emit_node(body);
            }

            // Declarations
            TargetNode::Module(items) => self.emit_module(items),
            TargetNode::Import { names, module } => {
                self.write("import { ");
                self.write(&names.join(", "));
                self.write(" } from \"");
                self.write(module);
                self.write("\";");
            }
            TargetNode::Class {
                modifiers,
                name,
                type_params,
                extends,
                implements,
                members,
            } => {
                self.emit_modifiers(modifiers);
                self.write("class ");
                self.write(name);
                self.emit_type_params(type_params);
                if let Some(base) = extends {
                    self.write(" extends ");
                    self.write_type(base);
                }
                if !implements.is_empty() {
                    self.write(" implements ");
                    self.write_type_list(implements);
                }
                self.write(" ");
                self.emit_members(members);
            }
            TargetNode::Interface {
                modifiers,
                name,
                type_params,
                extends,
                members,
            } => {
                self.emit_modifiers(modifiers);
                self.write("interface ");
                self.write(name);
                self.emit_type_params(type_params);
                if !extends.is_empty() {
                    self.write(" extends ");
                    self.write_type_list(extends);
                }
                self.write(" ");
                self.emit_members(members);
            }
            TargetNode::Method {
                modifiers,
                name,
                type_params,
                params,
                return_type,
                body,
            } => {
                self.emit_modifiers(modifiers);
                self.write(name);
                self.emit_type_params(type_params);
                self.write("(");
                self.emit_parameters(params);
                self.write("): ");
                self.write_type(return_type);
                match body {
                    Some(body) => {
                        self.write(" ");
                        self.emit_block(body);
                    }
                    None => self.write(";"),
                }
            }
            TargetNode::Constructor {
                modifiers,
                params,
                body,
            } => {
                self.emit_modifiers(modifiers);
                self.write("constructor(");
                self.emit_parameters(params);
                self.write(") ");
                self.emit_block(body);
            }
            TargetNode::Property {
                modifiers,
                name,
                ty,
                initializer,
            } => {
                self.emit_modifiers(modifiers);
                self.write(name);
                self.write(": ");
                self.write_type(ty);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_operand(init, PREC_ASSIGN);
                }
                self.write(";");
            }
            TargetNode::StaticBlock(body) => {
                self.write("static ");
                self.emit_block(body);
            }

            // Carriers
            TargetNode::Type(ty) => self.write_type(ty),
            TargetNode::Parameter(param) => self.emit_parameters(std::slice::from_ref(param)),
            TargetNode::TypeParameter(param) => self.emit_type_param(param),
            TargetNode::Placeholder { text, flavor } => self.emit_placeholder(text, *flavor),
        }
    }

    /// Print `let a: T = x` (without `;`). `with_kind` is false for the
    /// second and later declarators of a `for` initializer list.
    pub(crate) fn emit_var_decl_head(&mut self, node: &TargetNode, with_kind: bool) {
        if let TargetNode::VarDecl {
            kind,
            name,
            ty,
            initializer,
        } = node
        {
            if with_kind {
                self.write(kind.as_str());
                self.write(" ");
            }
            self.write(name);
            if let Some(ty) = ty {
                self.write(": ");
                self.write_type(ty);
            }
            if let Some(init) = initializer {
                self.write(" = ");
                self.emit_operand(init, PREC_ASSIGN);
            }
        }
    }

    fn emit_for_init(&mut self, init: &[TargetNode]) {
        let mut kind: Option<VarKind> = None;
        for (i, item) in init.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match item {
                TargetNode::VarDecl { kind: k, .. } => {
                    self.emit_var_decl_head(item, kind != Some(*k));
                    kind = Some(*k);
                }
                TargetNode::ExpressionStatement(expr) => self.emit_node(expr),
                other => self.emit_node(other),
            }
        }
    }

    fn emit_jump(&mut self, keyword: &str, label: Option<&str>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(label);
        }
        self.write(";");
    }

    fn emit_placeholder(&mut self, text: &str, flavor: PlaceholderFlavor) {
        let escaped = text.replace("*/", "*\\/");
        match flavor {
            PlaceholderFlavor::Statement => {
                self.write("__untranslated_statement(/* ");
                self.write(&escaped);
                self.write(" */);");
            }
            PlaceholderFlavor::Expression => {
                self.write("__untranslated_expression(/* ");
                self.write(&escaped);
                self.write(" */)");
            }
            PlaceholderFlavor::Member => {
                self.write("/* untranslated: ");
                self.write(&escaped);
                self.write(" */");
            }
        }
    }

    /// Emit `node`, parenthesized when it binds looser than `min`.
    pub(crate) fn emit_operand(&mut self, node: &TargetNode, min: u8) {
        if precedence(node) < min {
            self.write("(");
            self.emit_node(node);
            self.write(")");
        } else {
            self.emit_node(node);
        }
    }
}

impl Default for ArkTsPrinter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const PREC_ASSIGN: u8 = 2;
pub(crate) const PREC_CONDITIONAL: u8 = 3;
pub(crate) const PREC_RELATIONAL: u8 = 10;
pub(crate) const PREC_PREFIX: u8 = 15;
pub(crate) const PREC_POSTFIX: u8 = 16;
pub(crate) const PREC_MEMBER: u8 = 18;
const PREC_PRIMARY: u8 = 20;

pub(crate) fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "||" => 4,
        "&&" => 5,
        "|" => 6,
        "^" => 7,
        "&" => 8,
        "==" | "!=" | "===" | "!==" => 9,
        "<" | ">" | "<=" | ">=" => PREC_RELATIONAL,
        "<<" | ">>" | ">>>" => 11,
        "+" | "-" => 12,
        "*" | "/" | "%" => 13,
        _ => PREC_ASSIGN,
    }
}

fn precedence(node: &TargetNode) -> u8 {
    match node {
        TargetNode::Assign { .. } => PREC_ASSIGN,
        TargetNode::Conditional { .. } => PREC_CONDITIONAL,
        TargetNode::Binary { operator, .. } => binary_precedence(operator),
        TargetNode::As { .. } | TargetNode::InstanceOf { .. } => PREC_RELATIONAL,
        TargetNode::PrefixUnary { .. } => PREC_PREFIX,
        TargetNode::PostfixUnary { .. } => PREC_POSTFIX,
        TargetNode::Call { .. }
        | TargetNode::New { .. }
        | TargetNode::NewArray { .. }
        | TargetNode::PropertyAccess { .. }
        | TargetNode::ElementAccess { .. } => PREC_MEMBER,
        _ => PREC_PRIMARY,
    }
}
