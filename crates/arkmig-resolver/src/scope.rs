//! Lexical scope chain for locals and parameters.

use arkmig_java::JavaType;
use rustc_hash::FxHashMap;

/// Stack of variable frames, innermost last.
#[derive(Debug, Clone, Default)]
pub struct Scopes {
    frames: Vec<FxHashMap<String, JavaType>>,
}

impl Scopes {
    pub fn new() -> Self {
        Scopes {
            frames: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        // The outermost frame stays
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Declare `name` in the innermost frame, shadowing outer declarations.
    pub fn declare(&mut self, name: impl Into<String>, ty: JavaType) {
        if self.frames.is_empty() {
            self.frames.push(FxHashMap::default());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), ty);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&JavaType> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}
