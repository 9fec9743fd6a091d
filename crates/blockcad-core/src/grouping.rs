//! 按图层分组
//!
//! 把选中的成员按所在图层划分成有序分组，
//! 分组键为 `{名称模板}_{图层名}`。

use std::collections::HashMap;

/// 一个图层分组
#[derive(Debug, Clone)]
pub struct LayerGroup<T> {
    /// 分组键，同时是将要创建的块定义名
    pub key: String,
    /// 成员（保持输入顺序）
    pub members: Vec<T>,
}

/// 按图层名分组
///
/// - 键 = `{name_template}_{layer_name_of(member)}`
/// - 分组顺序为键的首见顺序，组内成员顺序为输入顺序。
///   该顺序有意义：每组第一个成员的图层将作为
///   实例放置时的代表图层。
/// - 不丢弃任何成员（上游选择过滤器已排除的对象不会到这里）。
pub fn group_by_layer<T>(
    members: impl IntoIterator<Item = T>,
    name_template: &str,
    mut layer_name_of: impl FnMut(&T) -> String,
) -> Vec<LayerGroup<T>> {
    let mut groups: Vec<LayerGroup<T>> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for member in members {
        let key = format!("{}_{}", name_template, layer_name_of(&member));
        match index_by_key.get(&key) {
            Some(&i) => groups[i].members.push(member),
            None => {
                index_by_key.insert(key.clone(), groups.len());
                groups.push(LayerGroup {
                    key,
                    members: vec![member],
                });
            }
        }
    }

    groups
}
