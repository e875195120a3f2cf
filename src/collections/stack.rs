use crate::{Error, Result};

/// A LIFO stack which holds at most `capacity` values.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(Error::StackFull);
        }
        self.items.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(Error::EmptyStack)
    }

    pub fn peek(&self) -> Result<&T> {
        self.items.last().ok_or(Error::EmptyStack)
    }

    /// Iterates from the bottom to the top.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Values from the bottom to the top.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo() {
        let mut s = BoundedStack::with_capacity(3);
        s.push(1).unwrap();
        s.push(2).unwrap();
        assert_eq!(s.peek(), Ok(&2));
        assert_eq!(s.pop(), Ok(2));
        s.push(3).unwrap();
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(s.pop(), Ok(3));
        assert_eq!(s.pop(), Ok(1));
        assert_eq!(s.pop(), Err(Error::EmptyStack));
        assert_eq!(s.peek(), Err(Error::EmptyStack));
    }

    #[test]
    fn bounded() {
        let mut s = BoundedStack::with_capacity(1);
        s.push('a').unwrap();
        assert_eq!(s.push('b'), Err(Error::StackFull));
        assert_eq!(s.len(), 1);
        assert_eq!(s.into_vec(), vec!['a']);
    }
}
