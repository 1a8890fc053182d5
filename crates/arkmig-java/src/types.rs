//! Java static types attached to source nodes and symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "char" => PrimitiveType::Char,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "void" => PrimitiveType::Void,
            _ => return None,
        };
        Some(primitive)
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveType::Boolean | PrimitiveType::Void)
    }

    /// Position in the widening primitive conversion order (JLS 5.1.2).
    /// `char` widens to `int` but not to `short`, which the caller handles.
    pub const fn widening_rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Byte => Some(0),
            PrimitiveType::Short | PrimitiveType::Char => Some(1),
            PrimitiveType::Int => Some(2),
            PrimitiveType::Long => Some(3),
            PrimitiveType::Float => Some(4),
            PrimitiveType::Double => Some(5),
            PrimitiveType::Boolean | PrimitiveType::Void => None,
        }
    }

    /// Whether a value of `self` converts to `target` by identity or widening.
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        if self == target {
            return true;
        }
        if self == PrimitiveType::Char && target == PrimitiveType::Short {
            return false;
        }
        if target == PrimitiveType::Char {
            return false;
        }
        match (self.widening_rank(), target.widening_rank()) {
            (Some(from), Some(to)) => from < to,
            _ => false,
        }
    }
}

/// A resolved Java type.
///
/// Class names are fully qualified when the front end could resolve them
/// (`java.util.List`), otherwise they carry the name as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JavaType {
    Primitive {
        primitive: PrimitiveType,
    },
    Class {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<JavaType>,
    },
    Array {
        element: Box<JavaType>,
    },
    TypeVariable {
        name: String,
    },
    Intersection {
        bounds: Vec<JavaType>,
    },
    Null,
    Unknown,
}

impl JavaType {
    pub fn primitive(primitive: PrimitiveType) -> Self {
        JavaType::Primitive { primitive }
    }

    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        JavaType::Class {
            name: name.into(),
            args,
        }
    }

    pub fn array(element: JavaType) -> Self {
        JavaType::Array {
            element: Box::new(element),
        }
    }

    pub fn type_variable(name: impl Into<String>) -> Self {
        JavaType::TypeVariable { name: name.into() }
    }

    pub fn void() -> Self {
        JavaType::primitive(PrimitiveType::Void)
    }

    pub fn object() -> Self {
        JavaType::class("java.lang.Object")
    }

    pub fn string() -> Self {
        JavaType::class("java.lang.String")
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, JavaType::Unknown)
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self,
            JavaType::Primitive {
                primitive: PrimitiveType::Void
            }
        )
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            JavaType::Class { .. }
                | JavaType::Array { .. }
                | JavaType::TypeVariable { .. }
                | JavaType::Intersection { .. }
                | JavaType::Null
        )
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            JavaType::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    /// Qualified class name, if this is a class type.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            JavaType::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[JavaType] {
        match self {
            JavaType::Class { args, .. } => args,
            _ => &[],
        }
    }

    pub fn element_type(&self) -> Option<&JavaType> {
        match self {
            JavaType::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Last segment of a class name (`java.util.List` -> `List`).
    pub fn simple_name(&self) -> String {
        match self {
            JavaType::Class { name, .. } => simple_name(name).to_string(),
            JavaType::Array { element } => format!("{}[]", element.simple_name()),
            other => other.to_string(),
        }
    }

    /// Name used when deriving identifiers from a type, e.g. for overload
    /// suffixes: `int`, `String`, `intArr`, `List`.
    pub fn identifier_fragment(&self) -> String {
        match self {
            JavaType::Primitive { primitive } => primitive.keyword().to_string(),
            JavaType::Class { name, .. } => simple_name(name).replace('$', "_"),
            JavaType::Array { element } => format!("{}Arr", element.identifier_fragment()),
            JavaType::TypeVariable { name } => name.clone(),
            JavaType::Intersection { bounds } => bounds
                .iter()
                .map(JavaType::identifier_fragment)
                .collect::<Vec<_>>()
                .join("And"),
            JavaType::Null => "null".to_string(),
            JavaType::Unknown => "unknown".to_string(),
        }
    }

    /// Replace type variables named in `params` with the matching `args`.
    pub fn substitute(&self, params: &[String], args: &[JavaType]) -> JavaType {
        match self {
            JavaType::TypeVariable { name } => params
                .iter()
                .position(|p| p == name)
                .and_then(|i| args.get(i).cloned())
                .unwrap_or_else(|| self.clone()),
            JavaType::Class { name, args: inner } => JavaType::Class {
                name: name.clone(),
                args: inner.iter().map(|a| a.substitute(params, args)).collect(),
            },
            JavaType::Array { element } => JavaType::array(element.substitute(params, args)),
            JavaType::Intersection { bounds } => JavaType::Intersection {
                bounds: bounds.iter().map(|b| b.substitute(params, args)).collect(),
            },
            other => other.clone(),
        }
    }
}

/// Last segment of a dotted name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive { primitive } => f.write_str(primitive.keyword()),
            JavaType::Class { name, args } => {
                f.write_str(simple_name(name))?;
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
            JavaType::Array { element } => write!(f, "{element}[]"),
            JavaType::TypeVariable { name } => f.write_str(name),
            JavaType::Intersection { bounds } => {
                for (i, bound) in bounds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    write!(f, "{bound}")?;
                }
                Ok(())
            }
            JavaType::Null => f.write_str("null"),
            JavaType::Unknown => f.write_str("?"),
        }
    }
}
