//! 脚本化输入
//!
//! 预先排入的响应按提示顺序回放，用于测试和非交互执行。
//! 对象选择同样经过类型过滤，与真实前端保持一致。

use std::collections::VecDeque;

use blockcad_core::document::{Document, ObjectId, ObjectTypeFilter};
use blockcad_core::math::Point3;

use crate::input::{CommandInput, OptionToggle, Response};

/// 预置响应的输入实现
///
/// 每类提示维护一个独立队列；队列耗尽时返回取消，
/// 正好模拟用户在该提示处按下 Esc。
#[derive(Debug, Default)]
pub struct ScriptedInput {
    objects: VecDeque<Response<Vec<ObjectId>>>,
    points: VecDeque<Response<Point3>>,
    strings: VecDeque<Response<String>>,
    bools: VecDeque<Response<bool>>,
    /// 选择过程中要翻转的开关 (名称, 目标值)
    toggle_overrides: Vec<(&'static str, bool)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 排入一次对象选择
    pub fn pick_objects(mut self, ids: Vec<ObjectId>) -> Self {
        self.objects.push_back(Response::Value(ids));
        self
    }

    /// 排入一次选择取消
    pub fn cancel_objects(mut self) -> Self {
        self.objects.push_back(Response::Cancel);
        self
    }

    /// 排入一次取点
    pub fn pick_point(mut self, point: Point3) -> Self {
        self.points.push_back(Response::Value(point));
        self
    }

    /// 排入一次取点取消
    pub fn cancel_point(mut self) -> Self {
        self.points.push_back(Response::Cancel);
        self
    }

    /// 排入一个字符串
    pub fn enter_string(mut self, s: impl Into<String>) -> Self {
        self.strings.push_back(Response::Value(s.into()));
        self
    }

    /// 排入一次字符串取消
    pub fn cancel_string(mut self) -> Self {
        self.strings.push_back(Response::Cancel);
        self
    }

    /// 排入一个布尔确认
    pub fn confirm_bool(mut self, value: bool) -> Self {
        self.bools.push_back(Response::Value(value));
        self
    }

    /// 选择过程中把开关翻到目标值
    pub fn set_toggle(mut self, name: &'static str, value: bool) -> Self {
        self.toggle_overrides.push((name, value));
        self
    }
}

impl CommandInput for ScriptedInput {
    fn get_objects(
        &mut self,
        doc: &Document,
        _prompt: &str,
        filter: &ObjectTypeFilter,
        toggles: &mut [OptionToggle],
    ) -> Response<Vec<ObjectId>> {
        for (name, value) in &self.toggle_overrides {
            if let Some(toggle) = toggles.iter_mut().find(|t| t.name == *name) {
                toggle.value = *value;
            }
        }

        match self.objects.pop_front() {
            Some(Response::Value(mut ids)) => {
                // 与交互前端一致：不满足过滤器的对象不可选中
                ids.retain(|id| {
                    doc.objects
                        .get(*id)
                        .is_some_and(|o| filter.allows(o.content.object_type()))
                });
                Response::Value(ids)
            }
            Some(Response::Cancel) | None => Response::Cancel,
        }
    }

    fn get_point(&mut self, _prompt: &str) -> Response<Point3> {
        self.points.pop_front().unwrap_or(Response::Cancel)
    }

    fn get_string(&mut self, _prompt: &str) -> Response<String> {
        self.strings.pop_front().unwrap_or(Response::Cancel)
    }

    fn get_bool(
        &mut self,
        _prompt: &str,
        default: bool,
        _off_label: &str,
        _on_label: &str,
    ) -> Response<bool> {
        match self.bools.pop_front() {
            Some(response) => response,
            None => Response::Value(default),
        }
    }
}
