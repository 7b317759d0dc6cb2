// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

use crate::config::{Config, Strategy};
use crate::engine::level_by_level::LevelByLevelExecutor;
use crate::engine::work_queue::WorkQueueExecutor;
use crate::traits::DagExecutor;

/// Factory for creating DAG executors from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Create a DAG executor based on the configuration strategy
    pub fn from_config(cfg: &Config) -> Box<dyn DagExecutor> {
        let max_concurrency = cfg.executor_options.max_concurrency();
        let timeout = cfg.executor_options.timeout_seconds.map(Duration::from_secs);

        match cfg.strategy {
            Strategy::WorkQueue => {
                Box::new(WorkQueueExecutor::new(max_concurrency).with_timeout(timeout))
            }
            Strategy::Level => {
                Box::new(LevelByLevelExecutor::new(max_concurrency).with_timeout(timeout))
            }
        }
    }
}
