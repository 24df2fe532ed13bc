use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use super::runtime::RuntimeErrorKind;
use super::value::Value;

/// A handle to one frame of the scope chain.
///
/// Cloning the handle shares the frame, which is how closures keep the scope
/// they were declared in alive after the block that created it has exited.
#[derive(Clone)]
pub struct Environment {
    frame: Rc<Frame>,
}

struct Frame {
    values: RefCell<HashMap<String, Value>>,
    enclosing: Option<Environment>,
}

impl Environment {
    pub fn new_global() -> Environment {
        Environment {
            frame: Rc::new(Frame {
                values: RefCell::new(HashMap::new()),
                enclosing: None,
            }),
        }
    }

    /// Create a child frame whose parent is this one.
    pub fn open_scope(&self) -> Environment {
        Environment {
            frame: Rc::new(Frame {
                values: RefCell::new(HashMap::new()),
                enclosing: Some(self.clone()),
            }),
        }
    }

    pub fn enclosing(&self) -> Option<&Environment> {
        self.frame.enclosing.as_ref()
    }

    /// Bind `name` in this frame, shadowing any binding in an ancestor.
    pub fn define(&self, name: &str, value: Value) {
        self.frame
            .values
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Result<Value, RuntimeErrorKind> {
        let mut env = Some(self);
        while let Some(current) = env {
            if let Some(value) = current.frame.values.borrow().get(name) {
                return Ok(value.clone());
            }
            env = current.enclosing();
        }
        Err(RuntimeErrorKind::UndefinedVariable(name.to_string()))
    }

    /// Rewrite the nearest existing binding of `name`. Never creates one.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        let mut env = Some(self);
        while let Some(current) = env {
            if let Some(slot) = current.frame.values.borrow_mut().get_mut(name) {
                *slot = value;
                return Ok(());
            }
            env = current.enclosing();
        }
        Err(RuntimeErrorKind::UndefinedVariable(name.to_string()))
    }

    pub fn is_same(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut env = self.enclosing();
        while let Some(current) = env {
            depth += 1;
            env = current.enclosing();
        }
        depth
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.frame.values.borrow().keys().cloned().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
