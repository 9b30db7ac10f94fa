use crate::{MemoConfig, MemoSeq, Result, Source};

#[derive(Debug, Clone, Default)]
pub struct MemoSeqBuilder {
    config: MemoConfig,
}

impl MemoSeqBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: MemoConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn initial_capacity(
        mut self,
        n: usize,
    ) -> Self {
        self.config.initial_capacity = n;
        self
    }

    pub fn registry_prune_threshold(
        mut self,
        n: usize,
    ) -> Self {
        self.config.registry_prune_threshold = n;
        self
    }

    pub fn build<S>(
        &self,
        source: S,
    ) -> Result<MemoSeq<S>>
    where
        S: Source,
        S::Item: Clone,
    {
        self.config.validate()?;
        Ok(MemoSeq::with_config(source, &self.config))
    }
}
