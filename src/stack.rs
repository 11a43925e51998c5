use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation on an empty stack")]
pub struct EmptyStackError;

/// LIFO container shared by the postfix converter and the evaluator.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<T, EmptyStackError> {
        self.items.pop().ok_or(EmptyStackError)
    }

    pub fn top(&self) -> Result<&T, EmptyStackError> {
        self.items.last().ok_or(EmptyStackError)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn top_does_not_remove() {
        let mut stack = Stack::new();
        stack.push("a");
        assert_eq!(stack.top(), Ok(&"a"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn empty_stack_fails() {
        let mut stack: Stack<i32> = Stack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), Err(EmptyStackError));
        assert_eq!(stack.top(), Err(EmptyStackError));
    }
}
