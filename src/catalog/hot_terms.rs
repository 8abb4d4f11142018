//! 热搜词统计
//!
//! 搜索完成后把 (关键词, 命中资源的分类) 投递到有界队列，由后台 worker
//! 按多数分类归属关键词并累加分数：
//! - 投递不阻塞请求，队列满时直接丢弃
//! - 仓储错误只记日志，永远不影响搜索请求

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace, warn};

use crate::errors::Result;
use crate::storage::CatalogRepository;
use crate::storage::models::{ALL_CATEGORY_ALIAS, SearchResult};

/// 多数分类
///
/// 空字符串不计票；票数相同时取最先出现的分类；全部为空时返回 "all"。
pub fn majority_category<'a, I>(categories: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    // 保持首次出现顺序，严格大于才替换，从而实现先到先得
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for category in categories {
        if category.is_empty() {
            continue;
        }
        match tally.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => tally.push((category, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((category, count));
        }
    }

    best.map(|(c, _)| c.to_string())
        .unwrap_or_else(|| ALL_CATEGORY_ALIAS.to_string())
}

/// 一次热词记录任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotTermJob {
    pub keyword: String,
    /// 每个命中结果一条（可能为空字符串）
    pub categories: Vec<String>,
}

impl HotTermJob {
    /// 关键词为空或没有结果时返回 None
    pub fn from_results(keyword: &str, results: &[SearchResult]) -> Option<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() || results.is_empty() {
            return None;
        }
        Some(Self {
            keyword: keyword.to_string(),
            categories: results.iter().map(|r| r.category.clone()).collect(),
        })
    }
}

/// 单次记录的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotTermOutcome {
    Created { category_id: i64 },
    Incremented { category_id: i64 },
}

pub struct HotTermTracker {
    repo: Arc<dyn CatalogRepository>,
    sender: mpsc::Sender<HotTermJob>,
    /// 已入队但尚未处理完的任务数
    pending: Arc<AtomicUsize>,
}

impl HotTermTracker {
    /// 创建 tracker，返回需要交给 `run` 的接收端
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<HotTermJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                repo,
                sender,
                pending: Arc::new(AtomicUsize::new(0)),
            },
            receiver,
        )
    }

    /// 创建 tracker 并在当前 tokio runtime 上启动后台 worker
    pub fn spawn(repo: Arc<dyn CatalogRepository>, capacity: usize) -> Arc<Self> {
        let (tracker, receiver) = Self::new(repo, capacity);
        let tracker = Arc::new(tracker);
        let worker = tracker.clone();
        tokio::spawn(async move {
            worker.run(receiver).await;
        });
        debug!("HotTermTracker started with queue capacity {}", capacity);
        tracker
    }

    /// 后台 worker：逐个处理队列中的任务
    pub async fn run(self: Arc<Self>, mut receiver: mpsc::Receiver<HotTermJob>) {
        while let Some(job) = receiver.recv().await {
            self.record(&job.keyword, &job.categories).await;
            self.pending.fetch_sub(1, Ordering::AcqRel);
        }
        debug!("HotTermTracker queue closed, worker exiting");
    }

    /// 投递搜索结果，立即返回
    ///
    /// 返回任务是否入队成功。
    pub fn submit(&self, keyword: &str, results: &[SearchResult]) -> bool {
        let Some(job) = HotTermJob::from_results(keyword, results) else {
            return false;
        };
        self.submit_job(job)
    }

    pub fn submit_job(&self, job: HotTermJob) -> bool {
        self.pending.fetch_add(1, Ordering::AcqRel);
        match self.sender.try_send(job) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(job)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                warn!("Hot-term queue is full, dropping keyword '{}'", job.keyword);
                false
            }
            Err(mpsc::error::TrySendError::Closed(job)) => {
                self.pending.fetch_sub(1, Ordering::AcqRel);
                warn!("Hot-term queue is closed, dropping keyword '{}'", job.keyword);
                false
            }
        }
    }

    /// 当前积压任务数
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// 等待队列清空，超时返回 false
    pub async fn drain(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending() > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            sleep(Duration::from_millis(20)).await;
        }
        true
    }

    /// 同步记录一次搜索，错误只记日志
    pub async fn record(&self, keyword: &str, categories: &[String]) {
        match self.try_record(keyword, categories).await {
            Ok(Some(outcome)) => trace!("Hot term '{}' recorded: {:?}", keyword, outcome),
            Ok(None) => {}
            Err(e) => warn!("Failed to record hot term '{}': {}", keyword, e),
        }
    }

    async fn try_record(
        &self,
        keyword: &str,
        categories: &[String],
    ) -> Result<Option<HotTermOutcome>> {
        let keyword = keyword.trim();
        if keyword.is_empty() || categories.is_empty() {
            return Ok(None);
        }

        let alias = majority_category(categories.iter().map(String::as_str));

        // 目标分类不存在时回落到 "all"
        let category = match self.repo.find_category_by_alias(&alias).await? {
            Some(category) => category,
            None if alias != ALL_CATEGORY_ALIAS => {
                match self.repo.find_category_by_alias(ALL_CATEGORY_ALIAS).await? {
                    Some(category) => category,
                    None => {
                        warn!("Category 'all' is missing, hot term '{}' skipped", keyword);
                        return Ok(None);
                    }
                }
            }
            None => {
                warn!("Category 'all' is missing, hot term '{}' skipped", keyword);
                return Ok(None);
            }
        };

        match self.repo.find_hot_term(category.id, keyword).await? {
            Some(item) => {
                self.repo.increment_hot_term(item.id).await?;
                Ok(Some(HotTermOutcome::Incremented {
                    category_id: category.id,
                }))
            }
            None => {
                self.repo.create_hot_term(category.id, keyword).await?;
                Ok(Some(HotTermOutcome::Created {
                    category_id: category.id,
                }))
            }
        }
    }
}
