//! Symbol table handed over by the Java front end.
//!
//! The table describes types that are referenced but not declared in the
//! migrated file (library and other project types). Types declared in the
//! file itself are derived from the tree by the resolver and overlaid on top.

use crate::modifiers::Modifiers;
use crate::types::{JavaType, PrimitiveType, simple_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeSymbolKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSymbol {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<JavaType>,
    pub return_type: JavaType,
    /// Whether the method carries an implementation (default methods).
    #[serde(default)]
    pub has_body: bool,
    #[serde(default)]
    pub varargs: bool,
}

impl MethodSymbol {
    pub fn new(name: &str, params: Vec<JavaType>, return_type: JavaType) -> Self {
        MethodSymbol {
            name: name.to_string(),
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params,
            return_type,
            has_body: false,
            varargs: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `foo(int, String)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    pub fn same_params(&self, other: &MethodSymbol) -> bool {
        self.params == other.params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSymbol {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: JavaType,
}

impl FieldSymbol {
    pub fn new(name: &str, modifiers: Modifiers, ty: JavaType) -> Self {
        FieldSymbol {
            name: name.to_string(),
            modifiers,
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSymbol {
    /// Qualified name (`java.util.List`, `com.example.Outer.Inner`).
    pub name: String,
    pub kind: TypeSymbolKind,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub superclass: Option<JavaType>,
    #[serde(default)]
    pub interfaces: Vec<JavaType>,
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    #[serde(default)]
    pub fields: Vec<FieldSymbol>,
}

impl TypeSymbol {
    pub fn new(name: &str, kind: TypeSymbolKind) -> Self {
        TypeSymbol {
            name: name.to_string(),
            kind,
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeSymbolKind::Interface
    }

    pub fn is_library(&self) -> bool {
        is_library_name(&self.name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodSymbol> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSymbol> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Direct supertypes: superclass first, then interfaces in order.
    pub fn supertypes(&self) -> impl Iterator<Item = &JavaType> {
        self.superclass.iter().chain(self.interfaces.iter())
    }
}

/// Whether a qualified type name belongs to the Java platform libraries.
pub fn is_library_name(name: &str) -> bool {
    name.starts_with("java.") || name.starts_with("javax.")
}

#[derive(Serialize, Deserialize)]
struct SymbolTableRepr {
    #[serde(default)]
    types: Vec<TypeSymbol>,
}

/// Types known to the front end, keyed by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SymbolTableRepr", into = "SymbolTableRepr")]
pub struct SymbolTable {
    types: IndexMap<String, TypeSymbol>,
}

impl From<SymbolTableRepr> for SymbolTable {
    fn from(repr: SymbolTableRepr) -> Self {
        let mut table = SymbolTable::new();
        for symbol in repr.types {
            table.insert(symbol);
        }
        table
    }
}

impl From<SymbolTable> for SymbolTableRepr {
    fn from(table: SymbolTable) -> Self {
        SymbolTableRepr {
            types: table.types.into_values().collect(),
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Insert or replace a type symbol.
    pub fn insert(&mut self, symbol: TypeSymbol) {
        self.types.insert(symbol.name.clone(), symbol);
    }

    pub fn get(&self, name: &str) -> Option<&TypeSymbol> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.values()
    }

    /// Add every symbol of `other`, replacing entries with the same name.
    pub fn merge(&mut self, other: &SymbolTable) {
        for symbol in other.iter() {
            self.insert(symbol.clone());
        }
    }

    /// The subset of the Java platform the engine has mappings for.
    pub fn jdk() -> Self {
        let mut table = SymbolTable::new();
        for symbol in jdk_symbols() {
            table.insert(symbol);
        }
        table
    }
}

fn prim(primitive: PrimitiveType) -> JavaType {
    JavaType::primitive(primitive)
}

fn tv(name: &str) -> JavaType {
    JavaType::type_variable(name)
}

fn class_symbol(
    name: &str,
    type_params: &[&str],
    superclass: Option<JavaType>,
    interfaces: Vec<JavaType>,
    methods: Vec<MethodSymbol>,
) -> TypeSymbol {
    let mut symbol = TypeSymbol::new(name, TypeSymbolKind::Class);
    symbol.type_params = type_params.iter().map(|s| s.to_string()).collect();
    symbol.superclass = superclass.or_else(|| (name != "java.lang.Object").then(JavaType::object));
    symbol.interfaces = interfaces;
    symbol.methods = methods;
    symbol
}

fn interface_symbol(
    name: &str,
    type_params: &[&str],
    interfaces: Vec<JavaType>,
    methods: Vec<MethodSymbol>,
) -> TypeSymbol {
    let mut symbol = TypeSymbol::new(name, TypeSymbolKind::Interface);
    symbol.type_params = type_params.iter().map(|s| s.to_string()).collect();
    symbol.interfaces = interfaces;
    symbol.methods = methods
        .into_iter()
        .map(|m| m.with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT))
        .collect();
    symbol
}

fn statics(methods: Vec<MethodSymbol>) -> Vec<MethodSymbol> {
    methods
        .into_iter()
        .map(|m| m.with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC))
        .collect()
}

fn boxed(name: &str, superclass: Option<JavaType>, unbox: &str, primitive: PrimitiveType) -> TypeSymbol {
    let mut symbol = class_symbol(
        name,
        &[],
        superclass,
        vec![JavaType::generic("java.lang.Comparable", vec![JavaType::class(name)])],
        vec![MethodSymbol::new(unbox, vec![], prim(primitive))],
    );
    symbol.modifiers |= Modifiers::FINAL;
    symbol
        .methods
        .extend(statics(vec![MethodSymbol::new("valueOf", vec![prim(primitive)], JavaType::class(name))]));
    symbol
}

fn jdk_symbols() -> Vec<TypeSymbol> {
    use PrimitiveType::{Boolean, Char, Double, Float, Int, Long, Void};

    let object = JavaType::object;
    let string = JavaType::string;
    let number = || JavaType::class("java.lang.Number");

    let mut string_symbol = class_symbol(
        "java.lang.String",
        &[],
        None,
        vec![
            JavaType::generic("java.lang.Comparable", vec![string()]),
            JavaType::class("java.lang.CharSequence"),
        ],
        vec![
            MethodSymbol::new("length", vec![], prim(Int)),
            MethodSymbol::new("charAt", vec![prim(Int)], prim(Char)),
            MethodSymbol::new("isEmpty", vec![], prim(Boolean)),
            MethodSymbol::new("equals", vec![object()], prim(Boolean)),
            MethodSymbol::new("substring", vec![prim(Int)], string()),
            MethodSymbol::new("substring", vec![prim(Int), prim(Int)], string()),
            MethodSymbol::new("indexOf", vec![string()], prim(Int)),
            MethodSymbol::new("contains", vec![JavaType::class("java.lang.CharSequence")], prim(Boolean)),
            MethodSymbol::new("startsWith", vec![string()], prim(Boolean)),
            MethodSymbol::new("endsWith", vec![string()], prim(Boolean)),
            MethodSymbol::new("toUpperCase", vec![], string()),
            MethodSymbol::new("toLowerCase", vec![], string()),
            MethodSymbol::new("trim", vec![], string()),
            MethodSymbol::new("concat", vec![string()], string()),
            MethodSymbol::new("compareTo", vec![string()], prim(Int)),
        ],
    );
    string_symbol.modifiers |= Modifiers::FINAL;

    let mut math = class_symbol(
        "java.lang.Math",
        &[],
        None,
        vec![],
        statics(vec![
            MethodSymbol::new("abs", vec![prim(Int)], prim(Int)),
            MethodSymbol::new("abs", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("max", vec![prim(Int), prim(Int)], prim(Int)),
            MethodSymbol::new("max", vec![prim(Double), prim(Double)], prim(Double)),
            MethodSymbol::new("min", vec![prim(Int), prim(Int)], prim(Int)),
            MethodSymbol::new("min", vec![prim(Double), prim(Double)], prim(Double)),
            MethodSymbol::new("sqrt", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("pow", vec![prim(Double), prim(Double)], prim(Double)),
            MethodSymbol::new("floor", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("ceil", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("round", vec![prim(Double)], prim(Long)),
            MethodSymbol::new("random", vec![], prim(Double)),
            MethodSymbol::new("sin", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("cos", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("tan", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("log", vec![prim(Double)], prim(Double)),
            MethodSymbol::new("exp", vec![prim(Double)], prim(Double)),
        ]),
    );
    math.modifiers |= Modifiers::FINAL;
    math.fields = vec![
        FieldSymbol::new("PI", Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL, prim(Double)),
        FieldSymbol::new("E", Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL, prim(Double)),
    ];

    let mut system = class_symbol(
        "java.lang.System",
        &[],
        None,
        vec![],
        statics(vec![MethodSymbol::new("currentTimeMillis", vec![], prim(Long))]),
    );
    system.modifiers |= Modifiers::FINAL;
    let stream = JavaType::class("java.io.PrintStream");
    system.fields = vec![
        FieldSymbol::new("out", Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL, stream.clone()),
        FieldSymbol::new("err", Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL, stream),
    ];

    let print_methods = ["println", "print"]
        .into_iter()
        .flat_map(|name| {
            let mut overloads = vec![MethodSymbol::new(name, vec![object()], prim(Void))];
            overloads.extend(
                [Boolean, Char, Int, Long, Float, Double]
                    .into_iter()
                    .map(|p| MethodSymbol::new(name, vec![prim(p)], prim(Void))),
            );
            overloads.push(MethodSymbol::new(name, vec![string()], prim(Void)));
            overloads
        })
        .chain(std::iter::once(MethodSymbol::new("println", vec![], prim(Void))))
        .collect();

    let mut to_array = MethodSymbol::new("toArray", vec![JavaType::array(tv("T"))], JavaType::array(tv("T")));
    to_array.type_params = vec!["T".to_string()];
    let list_methods = vec![
        MethodSymbol::new("get", vec![prim(Int)], tv("E")),
        MethodSymbol::new("set", vec![prim(Int), tv("E")], tv("E")),
        MethodSymbol::new("add", vec![tv("E")], prim(Boolean)),
        MethodSymbol::new("add", vec![prim(Int), tv("E")], prim(Void)),
        MethodSymbol::new("remove", vec![prim(Int)], tv("E")),
        MethodSymbol::new("indexOf", vec![object()], prim(Int)),
        MethodSymbol::new("toArray", vec![], JavaType::array(object())),
        to_array,
    ];
    let collection_methods = vec![
        MethodSymbol::new("size", vec![], prim(Int)),
        MethodSymbol::new("isEmpty", vec![], prim(Boolean)),
        MethodSymbol::new("contains", vec![object()], prim(Boolean)),
        MethodSymbol::new("add", vec![tv("E")], prim(Boolean)),
        MethodSymbol::new("clear", vec![], prim(Void)),
    ];
    let map_methods = vec![
        MethodSymbol::new("get", vec![object()], tv("V")),
        MethodSymbol::new("put", vec![tv("K"), tv("V")], tv("V")),
        MethodSymbol::new("containsKey", vec![object()], prim(Boolean)),
        MethodSymbol::new("remove", vec![object()], tv("V")),
        MethodSymbol::new("size", vec![], prim(Int)),
        MethodSymbol::new("isEmpty", vec![], prim(Boolean)),
        MethodSymbol::new("clear", vec![], prim(Void)),
    ];
    let of_e = |name: &str| JavaType::generic(name, vec![tv("E")]);
    let of_kv = |name: &str| JavaType::generic(name, vec![tv("K"), tv("V")]);

    vec![
        class_symbol(
            "java.lang.Object",
            &[],
            None,
            vec![],
            vec![
                MethodSymbol::new("equals", vec![object()], prim(Boolean)),
                MethodSymbol::new("hashCode", vec![], prim(Int)),
                MethodSymbol::new("toString", vec![], string()),
            ],
        ),
        string_symbol,
        interface_symbol(
            "java.lang.CharSequence",
            &[],
            vec![],
            vec![
                MethodSymbol::new("length", vec![], prim(Int)),
                MethodSymbol::new("charAt", vec![prim(Int)], prim(Char)),
            ],
        ),
        interface_symbol("java.lang.Runnable", &[], vec![], vec![MethodSymbol::new("run", vec![], prim(Void))]),
        interface_symbol(
            "java.lang.Comparable",
            &["T"],
            vec![],
            vec![MethodSymbol::new("compareTo", vec![tv("T")], prim(Int))],
        ),
        {
            let mut symbol = class_symbol(
                "java.lang.Number",
                &[],
                None,
                vec![],
                vec![
                    MethodSymbol::new("intValue", vec![], prim(Int)),
                    MethodSymbol::new("longValue", vec![], prim(Long)),
                    MethodSymbol::new("floatValue", vec![], prim(Float)),
                    MethodSymbol::new("doubleValue", vec![], prim(Double)),
                ],
            );
            symbol.modifiers |= Modifiers::ABSTRACT;
            symbol
        },
        {
            let mut symbol = boxed("java.lang.Integer", Some(number()), "intValue", Int);
            symbol
                .methods
                .extend(statics(vec![MethodSymbol::new("parseInt", vec![string()], prim(Int))]));
            symbol
        },
        boxed("java.lang.Long", Some(number()), "longValue", Long),
        {
            let mut symbol = boxed("java.lang.Double", Some(number()), "doubleValue", Double);
            symbol
                .methods
                .extend(statics(vec![MethodSymbol::new("parseDouble", vec![string()], prim(Double))]));
            symbol
        },
        boxed("java.lang.Float", Some(number()), "floatValue", Float),
        boxed("java.lang.Short", Some(number()), "shortValue", PrimitiveType::Short),
        boxed("java.lang.Byte", Some(number()), "byteValue", PrimitiveType::Byte),
        boxed("java.lang.Character", None, "charValue", Char),
        boxed("java.lang.Boolean", None, "booleanValue", Boolean),
        math,
        system,
        class_symbol("java.io.PrintStream", &[], None, vec![], print_methods),
        interface_symbol("java.lang.Iterable", &["T"], vec![], vec![]),
        interface_symbol(
            "java.util.Collection",
            &["E"],
            vec![JavaType::generic("java.lang.Iterable", vec![tv("E")])],
            collection_methods,
        ),
        interface_symbol("java.util.List", &["E"], vec![of_e("java.util.Collection")], list_methods),
        class_symbol("java.util.ArrayList", &["E"], None, vec![of_e("java.util.List")], vec![]),
        class_symbol("java.util.LinkedList", &["E"], None, vec![of_e("java.util.List")], vec![]),
        interface_symbol("java.util.Set", &["E"], vec![of_e("java.util.Collection")], vec![]),
        class_symbol("java.util.HashSet", &["E"], None, vec![of_e("java.util.Set")], vec![]),
        interface_symbol("java.util.Map", &["K", "V"], vec![], map_methods),
        class_symbol("java.util.HashMap", &["K", "V"], None, vec![of_kv("java.util.Map")], vec![]),
        class_symbol("java.util.LinkedHashMap", &["K", "V"], None, vec![of_kv("java.util.Map")], vec![]),
        class_symbol("java.util.TreeMap", &["K", "V"], None, vec![of_kv("java.util.Map")], vec![]),
    ]
}
