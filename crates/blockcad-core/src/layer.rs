//! 图层表
//!
//! 图层按索引寻址，支持层级嵌套（完整路径形如 `"A/B"`）。
//! 图层持有显示颜色和可选的渲染材质引用，
//! 属性覆盖策略以图层为数据源。

use serde::{Deserialize, Serialize};

use crate::properties::{Color, MaterialId};

/// 图层表索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerIndex(pub usize);

/// 图层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// 图层名（不含父级路径）
    pub name: String,
    /// 完整层级路径，父子层用 `/` 分隔
    pub full_path: String,
    /// 图层显示颜色
    pub color: Color,
    /// 渲染材质引用（None 表示图层未赋材质）
    pub material: Option<MaterialId>,
    /// 是否可见
    pub visible: bool,
}

impl Layer {
    /// 新建顶层图层（完整路径即图层名）
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        let name = name.into();
        Self {
            full_path: name.clone(),
            name,
            color,
            material: None,
            visible: true,
        }
    }

    /// 设置材质引用
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }
}

/// 图层表
///
/// 索引 0 固定为默认图层，不可删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerTable {
    layers: Vec<Layer>,
}

impl LayerTable {
    /// 新建只含默认图层的图层表
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Default", Color::WHITE)],
        }
    }

    /// 添加顶层图层，返回其索引
    pub fn add_layer(&mut self, layer: Layer) -> LayerIndex {
        self.layers.push(layer);
        LayerIndex(self.layers.len() - 1)
    }

    /// 添加子图层，完整路径由父图层路径拼接而成
    pub fn add_child_layer(
        &mut self,
        parent: LayerIndex,
        name: impl Into<String>,
        color: Color,
    ) -> Option<LayerIndex> {
        let parent_path = self.get(parent)?.full_path.clone();
        let name = name.into();
        let mut layer = Layer::new(name, color);
        layer.full_path = format!("{}/{}", parent_path, layer.name);
        Some(self.add_layer(layer))
    }

    /// 按索引查找
    pub fn get(&self, index: LayerIndex) -> Option<&Layer> {
        self.layers.get(index.0)
    }

    /// 按索引查找（可变）
    pub fn get_mut(&mut self, index: LayerIndex) -> Option<&mut Layer> {
        self.layers.get_mut(index.0)
    }

    /// 按完整路径查找
    pub fn find_by_path(&self, full_path: &str) -> Option<LayerIndex> {
        self.layers
            .iter()
            .position(|l| l.full_path == full_path)
            .map(LayerIndex)
    }

    /// 图层数量
    pub fn count(&self) -> usize {
        self.layers.len()
    }

    /// 迭代所有图层
    pub fn iter(&self) -> impl Iterator<Item = (LayerIndex, &Layer)> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, l)| (LayerIndex(i), l))
    }

    /// 所有图层的快照（用于序列化）
    pub fn all_layers(&self) -> &[Layer] {
        &self.layers
    }

    /// 从图层快照重建（快照必须含默认图层）
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        if layers.is_empty() {
            Self::new()
        } else {
            Self { layers }
        }
    }
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::new()
    }
}
