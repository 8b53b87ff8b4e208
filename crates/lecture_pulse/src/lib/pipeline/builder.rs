use lecture_datastore::{DataStore, QuizSink};

use crate::{
    llm::{QuizGenerator, SamplingParams, Summarizer},
    QuizPipeline,
};

pub struct QuizPipelineBuilder<D = (), S = (), Q = (), R = ()> {
    store: D,
    summarizer: S,
    generator: Q,
    remote_sink: Option<R>,
    sampling: SamplingParams,
}

impl QuizPipelineBuilder {
    pub fn new() -> Self {
        Self {
            store: (),
            summarizer: (),
            generator: (),
            remote_sink: None,
            sampling: SamplingParams::default(),
        }
    }
}

impl Default for QuizPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, Q, R> QuizPipelineBuilder<D, S, Q, R> {
    pub fn store<D2: DataStore + Send + Sync + 'static>(
        self,
        store: D2,
    ) -> QuizPipelineBuilder<D2, S, Q, R> {
        QuizPipelineBuilder {
            store,
            summarizer: self.summarizer,
            generator: self.generator,
            remote_sink: self.remote_sink,
            sampling: self.sampling,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> QuizPipelineBuilder<D, S2, Q, R> {
        QuizPipelineBuilder {
            store: self.store,
            summarizer,
            generator: self.generator,
            remote_sink: self.remote_sink,
            sampling: self.sampling,
        }
    }

    pub fn generator<Q2: QuizGenerator + Send + Sync + 'static>(
        self,
        generator: Q2,
    ) -> QuizPipelineBuilder<D, S, Q2, R> {
        QuizPipelineBuilder {
            store: self.store,
            summarizer: self.summarizer,
            generator,
            remote_sink: self.remote_sink,
            sampling: self.sampling,
        }
    }

    pub fn remote_sink<R2: QuizSink + Send + Sync + 'static>(
        self,
        remote_sink: Option<R2>,
    ) -> QuizPipelineBuilder<D, S, Q, R2> {
        QuizPipelineBuilder {
            store: self.store,
            summarizer: self.summarizer,
            generator: self.generator,
            remote_sink,
            sampling: self.sampling,
        }
    }

    pub fn sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }
}

impl<D, S, Q, R> QuizPipelineBuilder<D, S, Q, R>
where
    D: DataStore + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    Q: QuizGenerator + Send + Sync + 'static,
    R: QuizSink + Send + Sync + 'static,
{
    pub fn build(self) -> QuizPipeline<D, S, Q, R> {
        QuizPipeline {
            store: self.store,
            summarizer: self.summarizer,
            generator: self.generator,
            remote_sink: self.remote_sink,
            sampling: self.sampling,
        }
    }
}
