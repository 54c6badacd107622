// src/engine_lib/matrix_stack.rs

use glam::Mat4;

/// LIFO of cumulative transforms used while walking the figure.
///
/// Misuse (reading or popping an empty stack) is logged and answered with
/// `None`; keeping pushes and pops balanced is up to the caller.
#[derive(Debug, Default, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, m: Mat4) {
        self.stack.push(m);
    }

    pub fn top(&self) -> Option<Mat4> {
        let top = self.stack.last().copied();
        if top.is_none() {
            log::warn!("MatrixStack::top called on an empty stack");
        }
        top
    }

    pub fn pop(&mut self) -> Option<Mat4> {
        let popped = self.stack.pop();
        if popped.is_none() {
            log::warn!("MatrixStack::pop called on an empty stack");
        }
        popped
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
