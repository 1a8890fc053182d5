//! Declaration modifier flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Java declaration modifiers, as written or implied by the front end.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const DEFAULT = 1 << 6;
        const STRICTFP = 1 << 7;
        const SYNCHRONIZED = 1 << 8;
        const NATIVE = 1 << 9;
        const TRANSIENT = 1 << 10;
        const VOLATILE = 1 << 11;
    }
}

const KEYWORDS: &[(Modifiers, &str)] = &[
    (Modifiers::PUBLIC, "public"),
    (Modifiers::PROTECTED, "protected"),
    (Modifiers::PRIVATE, "private"),
    (Modifiers::STATIC, "static"),
    (Modifiers::ABSTRACT, "abstract"),
    (Modifiers::FINAL, "final"),
    (Modifiers::DEFAULT, "default"),
    (Modifiers::STRICTFP, "strictfp"),
    (Modifiers::SYNCHRONIZED, "synchronized"),
    (Modifiers::NATIVE, "native"),
    (Modifiers::TRANSIENT, "transient"),
    (Modifiers::VOLATILE, "volatile"),
];

impl Modifiers {
    /// Modifiers with no ArkTS counterpart that are dropped with a warning.
    pub const DROPPABLE: Modifiers = Modifiers::STRICTFP
        .union(Modifiers::SYNCHRONIZED)
        .union(Modifiers::TRANSIENT)
        .union(Modifiers::VOLATILE);

    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_private(self) -> bool {
        self.contains(Modifiers::PRIVATE)
    }

    pub fn is_final(self) -> bool {
        self.contains(Modifiers::FINAL)
    }

    /// Java keyword for a single flag.
    pub fn keyword(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, keyword)| *keyword)
    }

    /// Keywords of all set flags, in declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        self.iter().filter_map(Modifiers::keyword).collect()
    }
}
