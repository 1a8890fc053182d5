// Diagnostic message table.
//
// Codes are grouped by the component that reports them:
// 1xxx dispatcher, 2xxx interface and declaration lowering,
// 3xxx type lowering, 4xxx call/API lowering.

use super::{DiagnosticMessage, DiagnosticSeverity};

pub mod diagnostic_codes {
    pub const NO_APPLICABLE_RULE: u32 = 1001;
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: u32 = 1002;
    pub const SOURCE_NODES_NOT_VISITED: u32 = 1003;

    pub const INTERFACE_INITIALIZER_NOT_SUPPORTED: u32 = 2001;
    pub const INTERFACE_MEMBERS_MOVED_TO_COMPANION: u32 = 2002;
    pub const PRIVATE_METHODS_INLINED: u32 = 2003;
    pub const PRIVATE_METHODS_HOISTED: u32 = 2004;
    pub const OVERLOAD_RENAMED: u32 = 2005;
    pub const NESTED_TYPE_HOISTED: u32 = 2006;
    pub const SUPERTYPE_MEMBER_FLATTENED: u32 = 2007;
    pub const CAPABILITY_MEMBER_COLLISION: u32 = 2008;
    pub const DEFAULT_METHOD_FORWARDER_ADDED: u32 = 2009;
    pub const EXTERNAL_DEFAULT_METHOD: u32 = 2010;
    pub const MODIFIER_DROPPED: u32 = 2011;
    pub const NATIVE_METHOD_NOT_SUPPORTED: u32 = 2012;
    pub const OVERLOAD_NOT_RESOLVED: u32 = 2013;

    pub const INTERSECTION_CAST_NARROWED: u32 = 3001;
    pub const INTERSECTION_BOUND_NOT_APPLIED: u32 = 3002;
    pub const INTERSECTION_BOUND_AGGREGATED: u32 = 3003;
    pub const ARRAY_COVARIANCE_CAST: u32 = 3004;
    pub const RAW_TYPE_MIGRATED: u32 = 3005;

    pub const LIBRARY_CALL_NOT_MAPPED: u32 = 4001;
    pub const PREVIOUS_VALUE_TEMPORARY: u32 = 4002;
    pub const TO_ARRAY_HINT_NOT_FRESH: u32 = 4003;
    pub const APPROXIMATE_API_MAPPING: u32 = 4004;
}

pub mod diagnostic_messages {
    pub const NO_APPLICABLE_RULE: &str =
        "No migration rule applies to {0}; the original code was kept verbatim.";
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: &str =
        "Nesting depth limit of {0} exceeded; the original code was kept verbatim.";
    pub const SOURCE_NODES_NOT_VISITED: &str =
        "{0} source node(s) were not visited during migration.";

    pub const INTERFACE_INITIALIZER_NOT_SUPPORTED: &str = "Interface '{0}' declares an initializer block, which has no ArkTS equivalent; the original code was kept verbatim.";
    pub const INTERFACE_MEMBERS_MOVED_TO_COMPANION: &str =
        "Static members and method bodies of interface '{0}' were moved to '{1}'.";
    pub const PRIVATE_METHODS_INLINED: &str =
        "Private methods of interface '{0}' were inlined at their call sites.";
    pub const PRIVATE_METHODS_HOISTED: &str =
        "Private methods of interface '{0}' were moved to '{1}' with an explicit 'self' parameter.";
    pub const OVERLOAD_RENAMED: &str = "Overloaded method '{0}' was renamed to '{1}'.";
    pub const NESTED_TYPE_HOISTED: &str = "Nested type '{0}' was moved to top level as '{1}'.";
    pub const SUPERTYPE_MEMBER_FLATTENED: &str = "Member '{0}' of '{1}' was copied into '{2}' because only a single supertype is allowed here.";
    pub const CAPABILITY_MEMBER_COLLISION: &str = "Member '{0}' of '{1}' conflicts with a member already merged into '{2}'; the first declaration was kept.";
    pub const DEFAULT_METHOD_FORWARDER_ADDED: &str =
        "Class '{0}' received a forwarder for default method '{1}' of '{2}'.";
    pub const EXTERNAL_DEFAULT_METHOD: &str = "Class '{0}' inherits default method '{1}' from '{2}', which is declared outside this file; add an implementation manually.";
    pub const MODIFIER_DROPPED: &str =
        "Modifier '{0}' on '{1}' has no ArkTS equivalent and was dropped.";
    pub const NATIVE_METHOD_NOT_SUPPORTED: &str =
        "Native method '{0}' cannot be migrated; the original code was kept verbatim.";
    pub const OVERLOAD_NOT_RESOLVED: &str =
        "Could not select an overload of '{0}' for this call; '{1}' was used.";

    pub const INTERSECTION_CAST_NARROWED: &str = "Intersection cast to '{0}' was narrowed to '{1}'; dropped bound(s): {2}. Declare a combined interface at the declaration site instead.";
    pub const INTERSECTION_BOUND_NOT_APPLIED: &str = "Type parameter '{0}' keeps bound '{1}'; the remaining bound(s) {2} cannot be applied as an additional constraint.";
    pub const INTERSECTION_BOUND_AGGREGATED: &str =
        "Bounds {0} of type parameter '{1}' were aggregated into '{2}'.";
    pub const ARRAY_COVARIANCE_CAST: &str = "Array of '{0}' is used as an array of '{1}'; ArkTS arrays are invariant, so an explicit cast was added.";
    pub const RAW_TYPE_MIGRATED: &str = "Raw type '{0}' was migrated as '{1}'.";

    pub const LIBRARY_CALL_NOT_MAPPED: &str = "Call to '{0}.{1}' with {2} argument(s) has no known ArkTS equivalent; the original code was kept verbatim.";
    pub const PREVIOUS_VALUE_TEMPORARY: &str =
        "The value replaced by '{0}' is preserved in temporary '{1}'.";
    pub const TO_ARRAY_HINT_NOT_FRESH: &str = "The array passed to 'toArray' is not freshly allocated; it only supplies the element type and will not be filled.";
    pub const APPROXIMATE_API_MAPPING: &str =
        "'{0}' was mapped to '{1}', which is not exactly equivalent: {2}.";
}

macro_rules! message {
    ($name:ident, $severity:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            severity: DiagnosticSeverity::$severity,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(NO_APPLICABLE_RULE, Error),
    message!(MAXIMUM_NESTING_DEPTH_EXCEEDED, Error),
    message!(SOURCE_NODES_NOT_VISITED, Warning),
    message!(INTERFACE_INITIALIZER_NOT_SUPPORTED, Error),
    message!(INTERFACE_MEMBERS_MOVED_TO_COMPANION, Info),
    message!(PRIVATE_METHODS_INLINED, Info),
    message!(PRIVATE_METHODS_HOISTED, Info),
    message!(OVERLOAD_RENAMED, Info),
    message!(NESTED_TYPE_HOISTED, Info),
    message!(SUPERTYPE_MEMBER_FLATTENED, Warning),
    message!(CAPABILITY_MEMBER_COLLISION, Warning),
    message!(DEFAULT_METHOD_FORWARDER_ADDED, Info),
    message!(EXTERNAL_DEFAULT_METHOD, Warning),
    message!(MODIFIER_DROPPED, Warning),
    message!(NATIVE_METHOD_NOT_SUPPORTED, Error),
    message!(OVERLOAD_NOT_RESOLVED, Warning),
    message!(INTERSECTION_CAST_NARROWED, Warning),
    message!(INTERSECTION_BOUND_NOT_APPLIED, Warning),
    message!(INTERSECTION_BOUND_AGGREGATED, Info),
    message!(ARRAY_COVARIANCE_CAST, Warning),
    message!(RAW_TYPE_MIGRATED, Info),
    message!(LIBRARY_CALL_NOT_MAPPED, Error),
    message!(PREVIOUS_VALUE_TEMPORARY, Info),
    message!(TO_ARRAY_HINT_NOT_FRESH, Warning),
    message!(APPROXIMATE_API_MAPPING, Warning),
];
