//! 交互输入抽象（宿主适配器）
//!
//! 命令执行期间的所有用户交互都通过 `CommandInput` 进行：
//! 多对象选择（带类型过滤与内联开关）、取点、字符串、布尔确认。
//! 每个提示都可以被用户取消。

use blockcad_core::document::{Document, ObjectId, ObjectTypeFilter};
use blockcad_core::math::Point3;

/// 单个提示的响应
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    /// 用户给出的值
    Value(T),
    /// 用户取消了该提示
    Cancel,
}

impl<T> Response<T> {
    /// 转为 Option（取消 -> None）
    pub fn into_option(self) -> Option<T> {
        match self {
            Response::Value(v) => Some(v),
            Response::Cancel => None,
        }
    }
}

/// 多选过程中的内联布尔开关
///
/// 用户在选择对象的同时可以翻转开关（如 Material/Color）。
#[derive(Debug, Clone)]
pub struct OptionToggle {
    pub name: &'static str,
    pub value: bool,
    pub off_label: &'static str,
    pub on_label: &'static str,
}

impl OptionToggle {
    pub fn new(name: &'static str, default: bool, off_label: &'static str, on_label: &'static str) -> Self {
        Self {
            name,
            value: default,
            off_label,
            on_label,
        }
    }
}

/// 交互输入接口
///
/// 前端实现：控制台逐行读取，脚本回放预置响应。
/// 选择过滤在这一层完成：不满足 `filter` 的对象不可选中。
pub trait CommandInput {
    /// 多对象选择
    ///
    /// `toggles` 中的开关在选择过程中可被用户翻转，
    /// 返回时携带最终状态。
    fn get_objects(
        &mut self,
        doc: &Document,
        prompt: &str,
        filter: &ObjectTypeFilter,
        toggles: &mut [OptionToggle],
    ) -> Response<Vec<ObjectId>>;

    /// 取一个点
    fn get_point(&mut self, prompt: &str) -> Response<Point3>;

    /// 取一个字符串
    fn get_string(&mut self, prompt: &str) -> Response<String>;

    /// 布尔确认
    fn get_bool(
        &mut self,
        prompt: &str,
        default: bool,
        off_label: &str,
        on_label: &str,
    ) -> Response<bool>;
}
