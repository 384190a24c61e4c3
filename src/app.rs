//! 应用主结构
//!
//! `QuestionBrowser` 持有全部题目、界面状态、书签和各个视图。
//! 每条命令都在同一个执行上下文里同步处理完，只有加载数据时会挂起。

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::error::{AppError, AppResult, BrowseError};
use crate::infrastructure::{Environment, KeyValueStore, ResourceFetcher};
use crate::models::{CategoryFilter, QuestionRecord, ThemeMode, UiState};
use crate::render::palette::paint;
use crate::render::{DetailView, ListView, Palette, StatsPanel};
use crate::services::{
    visible_questions, BookmarkStore, DataLoader, DataTier, Notice, QuestionStats, ThemeService,
};
use crate::utils::{logging, truncate_text};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// 加载状态，对应页面上的加载提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready(DataTier),
    /// 加载失败后替换加载提示的消息，一直保留到下次成功加载
    Failed(String),
}

/// 一条命令的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// 应用主结构
pub struct QuestionBrowser<F, S, E> {
    loader: DataLoader<F>,
    bookmarks: BookmarkStore<S>,
    themes: ThemeService<E>,
    questions: Vec<QuestionRecord>,
    state: UiState,
    status: LoadStatus,
    notice: Option<Notice>,
    list: ListView,
    detail: Option<DetailView>,
    stats: StatsPanel,
    /// 最近一次存储写入失败的提示
    warning: Option<String>,
}

impl<F, S, E> QuestionBrowser<F, S, E>
where
    F: ResourceFetcher,
    S: KeyValueStore,
    E: Environment,
{
    pub fn new(fetcher: F, store: S, environment: E, config: &Config) -> Self {
        let themes = ThemeService::new(environment);
        let theme = themes.initial(&store);
        debug!("初始主题: {}", theme);

        Self {
            loader: DataLoader::new(fetcher, config),
            bookmarks: BookmarkStore::load(store),
            themes,
            questions: Vec::new(),
            state: UiState::new(theme),
            status: LoadStatus::Loading,
            notice: None,
            list: ListView::new(),
            detail: None,
            stats: StatsPanel::new(),
            warning: None,
        }
    }

    /// 加载题目，完成后计算统计并渲染列表
    ///
    /// 失败时把加载提示替换为错误消息，并把错误交给调用方
    pub async fn initialize(&mut self) -> AppResult<()> {
        self.status = LoadStatus::Loading;
        match self.loader.load().await {
            Ok(outcome) => {
                logging::log_questions_loaded(outcome.records.len(), outcome.tier);
                self.questions = outcome.records;
                self.notice = outcome.notice;
                self.status = LoadStatus::Ready(outcome.tier);
                self.detail = None;
                self.state.clear_selection();
                self.update_stats();
                self.refresh_list();
                Ok(())
            }
            Err(e) => {
                self.status = LoadStatus::Failed(format!("加载题目失败。错误: {}。请尝试 reload 重新加载。", e));
                Err(AppError::Load(e))
            }
        }
    }

    // ========== 状态读取 ==========

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn stats(&self) -> &StatsPanel {
        &self.stats
    }

    pub fn bookmarks(&self) -> &BookmarkStore<S> {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, id: i64) -> bool {
        self.bookmarks.is_bookmarked(id)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.state.theme())
    }

    /// 当前可见题目
    pub fn visible(&self) -> Vec<&QuestionRecord> {
        visible_questions(
            &self.questions,
            self.state.current_filter(),
            self.bookmarks.ids(),
            self.state.search_query(),
        )
    }

    // ========== 用户操作 ==========

    pub fn set_search(&mut self, query: &str) {
        self.state.set_search_query(query);
        info!("🔍 搜索: {:?}", self.state.search_query());
        self.refresh_list();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        info!("筛选: {}", filter);
        self.state.set_filter(filter);
        self.refresh_list();
    }

    /// 打开题目详情
    pub fn open_question(&mut self, id: i64) -> Result<(), BrowseError> {
        let record = self
            .questions
            .iter()
            .find(|q| q.id == id)
            .ok_or(BrowseError::NoRecordFound { id })?;
        debug!("打开题目 #{}: {}", id, truncate_text(&record.question, 40));
        self.detail = Some(DetailView::open(record, self.bookmarks.is_bookmarked(id)));
        self.state.select(id);
        Ok(())
    }

    /// 关闭详情，筛选和搜索保持不变
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.state.clear_selection();
    }

    /// 切换书签
    ///
    /// 当前在"已收藏"筛选下时整体重建列表，否则只更新对应卡片的图标。
    /// 不在题库中的 id 返回 `NoRecordFound`，书签和存储保持不变
    pub fn toggle_bookmark(&mut self, id: i64) -> AppResult<bool> {
        if !self.questions.iter().any(|q| q.id == id) {
            return Err(AppError::no_record(id));
        }
        let result = self.bookmarks.toggle(id);
        let bookmarked = self.bookmarks.is_bookmarked(id);

        self.update_stats();
        if *self.state.current_filter() == CategoryFilter::Bookmarked {
            self.refresh_list();
        } else {
            self.list.patch_bookmark(id, bookmarked);
        }
        if let Some(detail) = self.detail.as_mut().filter(|d| d.id == id) {
            detail.bookmarked = bookmarked;
        }

        match result {
            Ok(state) => {
                self.warning = None;
                Ok(state)
            }
            Err(e) => {
                warn!("⚠️ 书签保存失败: {}", e);
                self.warning = Some(format!("书签未能保存: {}", e));
                Err(AppError::Storage(e))
            }
        }
    }

    /// 切换当前打开题目的书签
    pub fn toggle_selected_bookmark(&mut self) -> Option<AppResult<bool>> {
        let id = self.state.selected_question_id()?;
        Some(self.toggle_bookmark(id))
    }

    pub fn toggle_theme(&mut self) -> AppResult<ThemeMode> {
        let current = self.state.theme();
        let next = current.toggled();
        self.state.set_theme(next);
        info!("主题切换为 {}", next);
        match self.themes.toggle(current, self.bookmarks.storage_mut()) {
            Ok(mode) => {
                self.warning = None;
                Ok(mode)
            }
            Err(e) => {
                warn!("⚠️ 主题保存失败: {}", e);
                self.warning = Some(format!("主题未能保存: {}", e));
                Err(AppError::Storage(e))
            }
        }
    }

    /// 处理一条命令
    pub async fn handle(&mut self, command: Command) -> (Outcome, String) {
        debug!("命令: {:?}", command);
        let output = match command {
            Command::List => {
                self.close_detail();
                self.screen(Instant::now())
            }
            Command::Search(query) => {
                self.set_search(&query);
                self.screen(Instant::now())
            }
            Command::Filter(filter) => {
                self.set_filter(filter);
                self.screen(Instant::now())
            }
            Command::Open(id) => {
                if let Err(e) = self.open_question(id) {
                    debug!("忽略: {}", e);
                }
                self.screen(Instant::now())
            }
            Command::Close => {
                self.close_detail();
                self.screen(Instant::now())
            }
            Command::Bookmark(Some(id)) => {
                // 列表里的书签按钮不会打开详情
                if let Err(AppError::Browse(e)) = self.toggle_bookmark(id) {
                    debug!("忽略: {}", e);
                }
                self.screen(Instant::now())
            }
            Command::Bookmark(None) => {
                let _ = self.toggle_selected_bookmark();
                self.screen(Instant::now())
            }
            Command::Theme => {
                let _ = self.toggle_theme();
                self.screen(Instant::now())
            }
            Command::Stats => self.render_stats(),
            Command::Reload => {
                let _ = self.initialize().await;
                self.screen(Instant::now())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return (Outcome::Quit, String::new()),
            Command::Unknown(input) => format!("无法识别的命令: {input}\n{HELP}"),
        };
        (Outcome::Continue, output)
    }

    /// 命令循环：逐行读取命令，把渲染结果写到输出
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(self.screen(Instant::now()).as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let (outcome, text) = self.handle(Command::parse(&line)).await;
            if outcome == Outcome::Quit {
                break;
            }
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n> ").await?;
            output.flush().await?;
        }
        info!("👋 退出");
        Ok(())
    }

    // ========== 渲染 ==========

    /// 当前整屏内容
    pub fn screen(&self, now: Instant) -> String {
        let palette = self.palette();
        let mut out = String::new();

        if let Some(notice) = self.notice.as_ref().filter(|n| n.is_active(now)) {
            out.push_str(&paint(palette.warning, &notice.message));
            out.push('\n');
        }
        if let Some(warning) = &self.warning {
            out.push_str(&paint(palette.error, warning));
            out.push('\n');
        }

        match &self.status {
            LoadStatus::Loading => out.push_str(&paint(palette.muted, "⏳ 正在加载题目...\n")),
            LoadStatus::Failed(message) => {
                out.push_str(&paint(palette.error, message));
                out.push('\n');
            }
            LoadStatus::Ready(_) => match &self.detail {
                Some(detail) => out.push_str(&detail.render(&palette)),
                None => {
                    out.push_str(&self.render_header(&palette));
                    out.push_str(&self.list.render(&palette));
                }
            },
        }
        out
    }

    pub fn render_stats(&self) -> String {
        self.stats.render(&self.palette())
    }

    fn render_header(&self, palette: &Palette) -> String {
        let query = self.state.search_query();
        let search = if query.is_empty() {
            String::new()
        } else {
            format!("  搜索: \"{query}\"")
        };
        format!(
            "{}\n",
            paint(
                palette.muted,
                &format!(
                    "筛选: {}{}  ·  {} 道题  ·  主题: {}",
                    self.state.current_filter(),
                    search,
                    self.list.cards().len(),
                    self.state.theme()
                )
            )
        )
    }

    fn refresh_list(&mut self) {
        let visible = visible_questions(
            &self.questions,
            self.state.current_filter(),
            self.bookmarks.ids(),
            self.state.search_query(),
        );
        self.list.rebuild(&visible, self.bookmarks.ids(), self.state.search_query());
    }

    fn update_stats(&mut self) {
        self.stats
            .update(QuestionStats::compute(&self.questions, self.bookmarks.len()));
    }
}
