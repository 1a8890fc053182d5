//! Helper methods for the ArkTS printer.
//!
//! Buffer and indentation primitives, list printing, and the layout of
//! blocks, class bodies and modules.

use crate::node::{Modifier, Param, TargetNode, TargetType, TypeParam};
use crate::printer::ArkTsPrinter;
use std::fmt::Write as _;

impl ArkTsPrinter {
    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_type(&mut self, ty: &TargetType) {
        // Writing into a String cannot fail
        let _ = write!(self.output, "{ty}");
    }

    pub(crate) fn write_type_list(&mut self, types: &[TargetType]) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_type(ty);
        }
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(crate) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub(crate) fn emit_comma_separated(&mut self, nodes: &[TargetNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_operand(node, crate::printer::PREC_ASSIGN);
        }
    }

    pub(crate) fn emit_parameters(&mut self, params: &[Param]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            self.write(&param.name);
            self.write(": ");
            self.write_type(&param.ty);
        }
    }

    pub(crate) fn emit_type_param(&mut self, param: &TypeParam) {
        self.write(&param.name);
        if let Some(constraint) = &param.constraint {
            self.write(" extends ");
            self.write_type(constraint);
        }
    }

    pub(crate) fn emit_type_params(&mut self, params: &[TypeParam]) {
        if params.is_empty() {
            return;
        }
        self.write("<");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_type_param(param);
        }
        self.write(">");
    }

    pub(crate) fn emit_type_args(&mut self, args: &[TargetType]) {
        if args.is_empty() {
            return;
        }
        self.write("<");
        self.write_type_list(args);
        self.write(">");
    }

    pub(crate) fn emit_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.write(modifier.as_str());
            self.write(" ");
        }
    }

    /// `{ ... }` with one statement per line; `{}` when empty.
    pub(crate) fn emit_block(&mut self, statements: &[TargetNode]) {
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in statements {
            self.write_indent();
            self.emit_node(stmt);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    /// Body of `if`/loops: a block stays on the header line, anything else
    /// goes on its own indented line.
    pub(crate) fn emit_embedded_statement(&mut self, stmt: &TargetNode) {
        if let TargetNode::Block(statements) = stmt {
            self.write(" ");
            self.emit_block(statements);
        } else {
            self.write_line();
            self.increase_indent();
            self.write_indent();
            self.emit_node(stmt);
            self.decrease_indent();
        }
    }

    pub(crate) fn emit_switch_case(&mut self, case: &TargetNode) {
        let TargetNode::Case { tests, statements } = case else {
            self.write_indent();
            self.emit_node(case);
            self.write_line();
            return;
        };
        if tests.is_empty() {
            self.write_indent();
            self.write("default:");
            self.write_line();
        }
        for test in tests {
            self.write_indent();
            self.write("case ");
            self.emit_node(test);
            self.write(":");
            self.write_line();
        }

        self.increase_indent();
        for stmt in statements {
            self.write_indent();
            self.emit_node(stmt);
            self.write_line();
        }
        self.decrease_indent();
    }

    /// Class or interface body. Consecutive fields and signatures stay
    /// together; anything with a body is set off by a blank line.
    pub(crate) fn emit_members(&mut self, members: &[TargetNode]) {
        if members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, member) in members.iter().enumerate() {
            if i > 0 && (has_body(member) || has_body(&members[i - 1])) {
                self.write_line();
            }
            self.write_indent();
            self.emit_node(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub(crate) fn emit_module(&mut self, items: &[TargetNode]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                let grouped = matches!(item, TargetNode::Import { .. })
                    && matches!(items[i - 1], TargetNode::Import { .. });
                if !grouped {
                    self.write_line();
                }
            }
            self.write_indent();
            self.emit_node(item);
            self.write_line();
        }
    }
}

fn has_body(member: &TargetNode) -> bool {
    matches!(
        member,
        TargetNode::Method { body: Some(_), .. }
            | TargetNode::Constructor { .. }
            | TargetNode::StaticBlock(_)
            | TargetNode::Class { .. }
            | TargetNode::Interface { .. }
    )
}
