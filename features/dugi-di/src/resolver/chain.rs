use crate::{errors::CyclicDependencyError, types::TypeInfo};

/// Types currently being resolved by a single `resolve` call, outermost first
#[derive(Debug, Default)]
pub struct ResolutionChain {
    chain: Vec<TypeInfo>,
}

impl ResolutionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `info`, failing if it is already being resolved
    pub fn enter(&mut self, info: TypeInfo) -> Result<(), CyclicDependencyError> {
        if self.chain.contains(&info) {
            let mut chain = self.chain.clone();
            chain.push(info);
            return Err(CyclicDependencyError { chain });
        }

        self.chain.push(info);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.chain.pop();
    }

    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// The type being resolved right now
    pub fn current(&self) -> Option<TypeInfo> {
        self.chain.last().copied()
    }
}
