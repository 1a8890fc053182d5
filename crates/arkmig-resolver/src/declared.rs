//! Symbols derived from the declarations of the file being migrated.

use crate::resolver::TypeResolver;
use arkmig_java::{
    FieldSymbol, JavaType, MethodSymbol, Modifiers, NodeData, NodeIndex, SourceUnit, TypeSymbol,
    TypeSymbolKind,
};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Qualified names of the class and interface declarations in a file.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeclaredTypes {
    pub(crate) names: FxHashMap<NodeIndex, String>,
    /// Qualified name to declaration, in source order (outer before inner).
    pub(crate) decls: IndexMap<String, NodeIndex>,
}

pub(crate) fn collect(unit: &SourceUnit, package: Option<&str>) -> DeclaredTypes {
    let mut declared = DeclaredTypes::default();
    let NodeData::CompilationUnit { types, .. } = unit.data(unit.root()) else {
        return declared;
    };
    for &decl in types {
        collect_type(unit, decl, package, &mut declared);
    }
    declared
}

fn collect_type(unit: &SourceUnit, decl: NodeIndex, prefix: Option<&str>, out: &mut DeclaredTypes) {
    let data = unit.data(decl);
    if !data.kind().is_type_declaration() {
        return;
    }
    let Some(name) = data.name() else {
        return;
    };
    let qualified = match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    };
    out.names.insert(decl, qualified.clone());
    out.decls.insert(qualified.clone(), decl);
    for &member in data.members() {
        collect_type(unit, member, Some(&qualified), out);
    }
}

/// Build the symbol of one declared type. Member types resolve against the
/// declaration itself.
pub(crate) fn build_symbol(resolver: &TypeResolver<'_>, decl: NodeIndex) -> Option<TypeSymbol> {
    let unit = resolver.unit();
    let name = resolver.qualified_name(decl)?;
    let data = unit.data(decl);
    let (kind, type_params, extends, implements) = match data {
        NodeData::ClassDeclaration {
            type_params,
            extends,
            implements,
            ..
        } => (
            TypeSymbolKind::Class,
            type_params,
            extends.iter().copied().collect::<Vec<_>>(),
            implements.as_slice(),
        ),
        NodeData::InterfaceDeclaration {
            type_params,
            extends,
            ..
        } => (
            TypeSymbolKind::Interface,
            type_params,
            Vec::new(),
            extends.as_slice(),
        ),
        _ => return None,
    };
    let is_interface = kind == TypeSymbolKind::Interface;

    let mut symbol = TypeSymbol::new(name, kind);
    symbol.modifiers = data.modifiers();
    symbol.type_params = type_params
        .iter()
        .filter_map(|&p| unit.data(p).name().map(str::to_string))
        .collect();
    symbol.superclass = match extends.first() {
        Some(&ty) => Some(resolver.type_from_node(ty)),
        None if !is_interface => Some(JavaType::object()),
        None => None,
    };
    symbol.interfaces = implements
        .iter()
        .map(|&ty| resolver.type_from_node(ty))
        .collect();

    for &member in data.members() {
        match unit.data(member) {
            NodeData::MethodDeclaration { .. } => {
                symbol.methods.push(method_symbol(resolver, member, is_interface));
            }
            NodeData::FieldDeclaration {
                modifiers,
                declarators,
                ..
            } => {
                let mut modifiers = *modifiers;
                if is_interface {
                    modifiers |= Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
                }
                for &declarator in declarators {
                    if let Some(field_name) = unit.data(declarator).name() {
                        let ty = resolver.declarator_type(declarator);
                        symbol.fields.push(FieldSymbol::new(field_name, modifiers, ty));
                    }
                }
            }
            _ => {}
        }
    }
    Some(symbol)
}

/// Symbol of a method declaration. Interface methods get their implicit
/// modifiers: `public` unless private, `abstract` without a body and
/// `default` for bodied instance methods.
pub(crate) fn method_symbol(
    resolver: &TypeResolver<'_>,
    method: NodeIndex,
    in_interface: bool,
) -> MethodSymbol {
    let unit = resolver.unit();
    let NodeData::MethodDeclaration {
        name,
        modifiers,
        type_params,
        params,
        return_type,
        body,
        ..
    } = unit.data(method)
    else {
        return MethodSymbol::new("", Vec::new(), JavaType::Unknown);
    };
    let mut modifiers = *modifiers;
    if in_interface && !modifiers.is_private() {
        modifiers |= Modifiers::PUBLIC;
        if body.is_none() {
            modifiers |= Modifiers::ABSTRACT;
        } else if !modifiers.is_static() {
            modifiers |= Modifiers::DEFAULT;
        }
    }
    let param_types = params.iter().map(|&p| resolver.param_type(p)).collect();
    let varargs = params
        .last()
        .is_some_and(|&p| matches!(unit.data(p), NodeData::Parameter { varargs: true, .. }));
    let mut symbol = MethodSymbol::new(name, param_types, resolver.type_from_node(*return_type))
        .with_modifiers(modifiers);
    symbol.type_params = type_params
        .iter()
        .filter_map(|&p| unit.data(p).name().map(str::to_string))
        .collect();
    symbol.has_body = body.is_some();
    symbol.varargs = varargs;
    symbol
}
