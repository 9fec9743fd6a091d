//! 文档模型
//!
//! 文档由三张表组成：
//! - `LayerTable`: 图层表（见 `layer` 模块）
//! - `ObjectTable`: 对象表（几何、光源、块实例等）
//! - `InstanceDefinitionTable`: 块定义（实例定义）表
//!
//! 文档是显式传递的可变上下文，所有表操作都通过它进行，
//! 不存在任何全局/静态的文档访问。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Geometry, Light};
use crate::layer::{Layer, LayerIndex, LayerTable};
use crate::math::{Point3, Transform3};
use crate::properties::ObjectAttributes;

/// 文档操作错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("instance definition name cannot be blank")]
    BlankDefinitionName,

    #[error("instance definition '{0}' already exists")]
    DuplicateDefinitionName(String),

    #[error("instance definition '{0}' has no members")]
    EmptyDefinition(String),

    #[error("no instance definition at index {0}")]
    DefinitionNotFound(usize),

    #[error("object {0} not found")]
    ObjectNotFound(u64),

    #[error("no layer at index {0}")]
    LayerNotFound(usize),
}

/// 对象表 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 实例定义表索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefIndex(pub usize);

/// 块实例引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRef {
    /// 引用的实例定义
    pub definition: DefIndex,
    /// 放置变换（定义空间 -> 世界空间）
    pub xform: Transform3,
}

/// 对象内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectContent {
    /// 模型几何
    Geometry(Geometry),
    /// 光源
    Light(Light),
    /// 编辑夹点（运行时对象）
    Grip,
    /// 幻影对象（运行时对象）
    Phantom,
    /// 块实例引用
    Instance(InstanceRef),
}

impl ObjectContent {
    /// 对象类型（用于选择过滤）
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectContent::Geometry(_) => ObjectType::Geometry,
            ObjectContent::Light(_) => ObjectType::Light,
            ObjectContent::Grip => ObjectType::Grip,
            ObjectContent::Phantom => ObjectType::Phantom,
            ObjectContent::Instance(_) => ObjectType::InstanceReference,
        }
    }
}

/// 对象类型分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Geometry,
    Light,
    Grip,
    Phantom,
    InstanceReference,
}

/// 对象类型过滤器
///
/// 以排除列表表达（原始命令用位掩码 `forbidden ^ AnyObject` 表达同一语义）。
#[derive(Debug, Clone, Default)]
pub struct ObjectTypeFilter {
    excluded: Vec<ObjectType>,
}

impl ObjectTypeFilter {
    /// 允许所有对象类型
    pub fn any() -> Self {
        Self::default()
    }

    /// 排除给定类型
    pub fn excluding(types: &[ObjectType]) -> Self {
        Self {
            excluded: types.to_vec(),
        }
    }

    /// 块定义成员过滤器：光源、夹点、幻影不能进块
    pub fn for_block_members() -> Self {
        Self::excluding(&[ObjectType::Light, ObjectType::Grip, ObjectType::Phantom])
    }

    /// 属性复制过滤器：排除夹点和幻影
    pub fn for_attribute_copy() -> Self {
        Self::excluding(&[ObjectType::Grip, ObjectType::Phantom])
    }

    /// 类型是否通过过滤
    pub fn allows(&self, object_type: ObjectType) -> bool {
        !self.excluded.contains(&object_type)
    }
}

/// 场景对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub content: ObjectContent,
    pub attributes: ObjectAttributes,
}

/// 对象表
///
/// ID 单调递增，迭代顺序即插入顺序。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectTable {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, content: ObjectContent, attributes: ObjectAttributes) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            SceneObject {
                id,
                content,
                attributes,
            },
        );
        id
    }

    /// 添加几何对象
    pub fn add_geometry(&mut self, geometry: Geometry, attributes: ObjectAttributes) -> ObjectId {
        self.insert(ObjectContent::Geometry(geometry), attributes)
    }

    /// 添加光源
    pub fn add_light(&mut self, light: Light, attributes: ObjectAttributes) -> ObjectId {
        self.insert(ObjectContent::Light(light), attributes)
    }

    /// 添加块实例对象
    pub fn add_instance(
        &mut self,
        definition: DefIndex,
        xform: Transform3,
        attributes: ObjectAttributes,
    ) -> ObjectId {
        self.insert(
            ObjectContent::Instance(InstanceRef { definition, xform }),
            attributes,
        )
    }

    /// 删除对象，返回被删除的对象
    pub fn delete(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(&id)
    }

    /// 按 ID 查找
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// 提交修改后的属性记录
    pub fn commit(
        &mut self,
        id: ObjectId,
        attributes: ObjectAttributes,
    ) -> Result<(), DocumentError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(DocumentError::ObjectNotFound(id.0))?;
        object.attributes = attributes;
        Ok(())
    }

    /// 迭代所有对象（插入顺序）
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// 对象数量
    pub fn count(&self) -> usize {
        self.objects.len()
    }

    /// 是否包含对象
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// 从对象快照重建（用于文件加载）
    pub fn from_objects(objects: Vec<SceneObject>) -> Self {
        let next_id = objects.iter().map(|o| o.id.0 + 1).max().unwrap_or(0);
        Self {
            objects: objects.into_iter().map(|o| (o.id, o)).collect(),
            next_id,
        }
    }
}

/// 块定义成员：内容 + 属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionMember {
    pub content: ObjectContent,
    pub attributes: ObjectAttributes,
}

/// 块定义（实例定义）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDefinition {
    /// 文档内唯一的定义名
    pub name: String,
    pub description: String,
    /// 基点（定义空间原点对应的模型位置）
    pub base_point: Point3,
    /// 有序成员列表
    pub members: Vec<DefinitionMember>,
}

/// 实例定义表
///
/// 槽位向量：删除只清空槽位，已发出的索引不会移位。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceDefinitionTable {
    definitions: Vec<Option<InstanceDefinition>>,
}

impl InstanceDefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名称查找定义
    pub fn find(&self, name: &str) -> Option<DefIndex> {
        self.definitions
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|d| d.name == name))
            .map(DefIndex)
    }

    /// 添加定义
    ///
    /// 拒绝空名、重名和空成员列表。
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        base_point: Point3,
        members: Vec<DefinitionMember>,
    ) -> Result<DefIndex, DocumentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DocumentError::BlankDefinitionName);
        }
        if self.find(&name).is_some() {
            return Err(DocumentError::DuplicateDefinitionName(name));
        }
        if members.is_empty() {
            return Err(DocumentError::EmptyDefinition(name));
        }

        let definition = InstanceDefinition {
            name,
            description: description.into(),
            base_point,
            members,
        };

        // 复用第一个空槽位
        if let Some(slot) = self.definitions.iter().position(|s| s.is_none()) {
            self.definitions[slot] = Some(definition);
            Ok(DefIndex(slot))
        } else {
            self.definitions.push(Some(definition));
            Ok(DefIndex(self.definitions.len() - 1))
        }
    }

    /// 删除定义，返回被删除的定义
    pub fn delete(&mut self, index: DefIndex) -> Result<InstanceDefinition, DocumentError> {
        self.definitions
            .get_mut(index.0)
            .and_then(Option::take)
            .ok_or(DocumentError::DefinitionNotFound(index.0))
    }

    /// 按索引查找
    pub fn get(&self, index: DefIndex) -> Option<&InstanceDefinition> {
        self.definitions.get(index.0).and_then(Option::as_ref)
    }

    /// 定义的成员列表
    pub fn members(&self, index: DefIndex) -> Option<&[DefinitionMember]> {
        self.get(index).map(|d| d.members.as_slice())
    }

    /// 现存定义数量（不含空槽位）
    pub fn count(&self) -> usize {
        self.definitions.iter().filter(|s| s.is_some()).count()
    }

    /// 迭代现存定义
    pub fn iter(&self) -> impl Iterator<Item = (DefIndex, &InstanceDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|d| (DefIndex(i), d)))
    }

    /// 槽位快照（用于序列化，保持索引稳定）
    pub fn slots(&self) -> &[Option<InstanceDefinition>] {
        &self.definitions
    }

    /// 从槽位快照重建
    pub fn from_slots(definitions: Vec<Option<InstanceDefinition>>) -> Self {
        Self { definitions }
    }
}

/// CAD 文档
#[derive(Debug, Clone)]
pub struct Document {
    pub layers: LayerTable,
    pub objects: ObjectTable,
    pub instance_definitions: InstanceDefinitionTable,
    /// 重绘版本号，每次 redraw_all 递增
    redraw_revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self {
            layers: LayerTable::new(),
            objects: ObjectTable::new(),
            instance_definitions: InstanceDefinitionTable::new(),
            redraw_revision: 0,
        }
    }

    /// 对象所在的图层
    pub fn layer_of(&self, attributes: &ObjectAttributes) -> Option<&Layer> {
        self.layers.get(attributes.layer)
    }

    /// 请求重绘所有视图
    ///
    /// 文档本身没有视图，这里只递增版本号，
    /// 前端据此得知文档内容已变化。
    pub fn redraw_all(&mut self) {
        self.redraw_revision += 1;
    }

    /// 当前重绘版本号
    pub fn redraw_revision(&self) -> u64 {
        self.redraw_revision
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;
    use crate::properties::ObjectAttributes;

    fn line_member() -> DefinitionMember {
        DefinitionMember {
            content: ObjectContent::Geometry(Geometry::Line(Line::new(
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
            ))),
            attributes: ObjectAttributes::on_layer(LayerIndex(0)),
        }
    }

    #[test]
    fn test_object_table_insertion_order() {
        let mut table = ObjectTable::new();
        let a = table.add_geometry(
            Geometry::Point(crate::geometry::Point::new(0.0, 0.0, 0.0)),
            ObjectAttributes::on_layer(LayerIndex(0)),
        );
        let b = table.add_geometry(
            Geometry::Point(crate::geometry::Point::new(1.0, 0.0, 0.0)),
            ObjectAttributes::on_layer(LayerIndex(0)),
        );

        let ids: Vec<ObjectId> = table.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_definition_add_rejects_blank_name() {
        let mut doc = Document::new();
        let member = line_member();
        let err = doc
            .instance_definitions
            .add("   ", "", Point3::origin(), vec![member])
            .unwrap_err();
        assert_eq!(err, DocumentError::BlankDefinitionName);
    }

    #[test]
    fn test_definition_add_rejects_duplicate() {
        let mut doc = Document::new();
        let member = line_member();
        doc.instance_definitions
            .add("Block", "", Point3::origin(), vec![member.clone()])
            .unwrap();
        let err = doc
            .instance_definitions
            .add("Block", "", Point3::origin(), vec![member])
            .unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateDefinitionName(_)));
    }

    #[test]
    fn test_definition_add_rejects_empty_members() {
        let mut doc = Document::new();
        let err = doc
            .instance_definitions
            .add("Block", "", Point3::origin(), vec![])
            .unwrap_err();
        assert!(matches!(err, DocumentError::EmptyDefinition(_)));
    }

    #[test]
    fn test_definition_delete_then_find() {
        let mut doc = Document::new();
        let member = line_member();
        let index = doc
            .instance_definitions
            .add("Block", "", Point3::origin(), vec![member])
            .unwrap();

        assert_eq!(doc.instance_definitions.find("Block"), Some(index));
        doc.instance_definitions.delete(index).unwrap();
        assert_eq!(doc.instance_definitions.find("Block"), None);
        assert_eq!(doc.instance_definitions.count(), 0);
    }

    #[test]
    fn test_deleted_slot_is_reused() {
        let mut doc = Document::new();
        let member = line_member();
        let first = doc
            .instance_definitions
            .add("A", "", Point3::origin(), vec![member.clone()])
            .unwrap();
        doc.instance_definitions.delete(first).unwrap();
        let second = doc
            .instance_definitions
            .add("B", "", Point3::origin(), vec![member])
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_commit_replaces_attributes() {
        let mut doc = Document::new();
        let id = doc.objects.add_geometry(
            Geometry::Point(crate::geometry::Point::new(0.0, 0.0, 0.0)),
            ObjectAttributes::on_layer(LayerIndex(0)),
        );

        let mut attrs = doc.objects.get(id).unwrap().attributes.clone();
        attrs.color_source = crate::properties::ColorSource::FromObject;
        doc.objects.commit(id, attrs.clone()).unwrap();
        assert_eq!(doc.objects.get(id).unwrap().attributes, attrs);
    }

    #[test]
    fn test_filter_for_block_members() {
        let filter = ObjectTypeFilter::for_block_members();
        assert!(filter.allows(ObjectType::Geometry));
        assert!(filter.allows(ObjectType::InstanceReference));
        assert!(!filter.allows(ObjectType::Light));
        assert!(!filter.allows(ObjectType::Grip));
        assert!(!filter.allows(ObjectType::Phantom));
    }

    #[test]
    fn test_filter_for_attribute_copy() {
        let filter = ObjectTypeFilter::for_attribute_copy();
        assert!(filter.allows(ObjectType::Light));
        assert!(filter.allows(ObjectType::InstanceReference));
        assert!(!filter.allows(ObjectType::Grip));
        assert!(!filter.allows(ObjectType::Phantom));
    }

    #[test]
    fn test_redraw_revision_increments() {
        let mut doc = Document::new();
        let before = doc.redraw_revision();
        doc.redraw_all();
        assert_eq!(doc.redraw_revision(), before + 1);
    }
}
