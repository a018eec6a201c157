/// 后台任务回传给 UI 线程的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    SaveFinished {
        sink: &'static str,
        ok: bool,
        error: Option<String>,
    },
}
