//! 块定义合成
//!
//! 两条路径，覆盖策略刻意不同：
//! - `create_blocks`: 按图层分组批量创建块定义。
//!   同名定义被删除重建（重跑命令即刷新定义）。
//! - `clone_with_overrides`: 克隆块定义并应用图层属性覆盖。
//!   派生名已存在时直接复用（重跑命令收敛到同一个变体定义）。

use tracing::warn;

use crate::document::{
    DefIndex, DefinitionMember, Document, DocumentError, ObjectContent, ObjectId,
};
use crate::grouping::group_by_layer;
use crate::math::{Plane, Point3, Transform3};
use crate::overrides::apply_overrides;
use crate::properties::{ColorSource, MaterialSource, ObjectAttributes};

/// `create_blocks` 为每个分组产出的结果
#[derive(Debug, Clone)]
pub struct CreatedBlock {
    /// 定义名（分组键）
    pub name: String,
    pub definition: DefIndex,
    /// 放置的实例对象
    pub instance: ObjectId,
}

/// `clone_with_overrides` 的结果
#[derive(Debug, Clone)]
pub enum CloneOutcome {
    /// 块实例：克隆（或复用）了定义并重新放置
    Instance {
        definition: DefIndex,
        instance: ObjectId,
        /// 派生定义已存在，被直接复用
        reused: bool,
    },
    /// 非块对象：属性就地覆盖并提交
    InPlace,
    /// 对象图层缺失，未做任何修改
    Skipped,
}

struct Member {
    content: ObjectContent,
    attributes: ObjectAttributes,
    layer_name: String,
}

/// 按图层分组创建块定义并放置实例
///
/// 每组：
/// 1. 同名旧定义先删除（完全覆盖，旧定义的手工修改会丢失）
/// 2. `all_to_parent` 时把所有成员的颜色/材质来源改为"来自父块"
/// 3. 创建定义；存储层拒绝（空名等）时记录日志并中止，
///    之前已提交的分组不回滚，原始对象也不删除
/// 4. 以基点处的世界 XY 平面放置实例，实例挂在组内
///    第一个成员的图层上
///
/// 全部分组成功后删除所有原始选中对象。
pub fn create_blocks(
    doc: &mut Document,
    selection: &[ObjectId],
    base_point: Point3,
    base_name: &str,
    all_to_parent: bool,
) -> Result<Vec<CreatedBlock>, DocumentError> {
    // 取出成员快照并解析图层名
    let mut members = Vec::new();
    for &id in selection {
        let Some(object) = doc.objects.get(id) else {
            continue;
        };
        let layer = doc
            .layer_of(&object.attributes)
            .ok_or(DocumentError::LayerNotFound(object.attributes.layer.0))?;
        members.push(Member {
            content: object.content.clone(),
            attributes: object.attributes.clone(),
            layer_name: layer.name.clone(),
        });
    }

    let groups = group_by_layer(members, base_name, |m| m.layer_name.clone());

    let placement = Transform3::plane_to_plane(
        &Plane::world_xy(),
        &Plane::world_xy().with_origin(base_point),
    );

    let mut created = Vec::with_capacity(groups.len());
    for group in groups {
        // 同名定义：删除重建
        if let Some(existing) = doc.instance_definitions.find(&group.key) {
            doc.instance_definitions.delete(existing)?;
        }

        let first_layer = group.members[0].attributes.layer;

        let definition_members: Vec<DefinitionMember> = group
            .members
            .into_iter()
            .map(|m| {
                let mut attributes = m.attributes;
                if all_to_parent {
                    attributes.color_source = ColorSource::FromParent;
                    attributes.material_source = MaterialSource::FromParent;
                }
                DefinitionMember {
                    content: m.content,
                    attributes,
                }
            })
            .collect();

        let definition = match doc.instance_definitions.add(
            group.key.clone(),
            String::new(),
            base_point,
            definition_members,
        ) {
            Ok(index) => index,
            Err(e) => {
                tracing::error!("Unable to create block definition {}: {}", group.key, e);
                return Err(e);
            }
        };

        let instance =
            doc.objects
                .add_instance(definition, placement, ObjectAttributes::on_layer(first_layer));

        created.push(CreatedBlock {
            name: group.key,
            definition,
            instance,
        });
    }

    // 移除原始几何
    for &id in selection {
        doc.objects.delete(id);
    }

    Ok(created)
}

/// 覆盖开关的短代码：C / M / CM / 空
pub fn override_code(use_material: bool, use_color: bool) -> &'static str {
    match (use_color, use_material) {
        (true, true) => "CM",
        (true, false) => "C",
        (false, true) => "M",
        (false, false) => "",
    }
}

/// 派生定义名：`{原定义名}_{代码}_{父图层完整路径}`
///
/// 原定义名已带同一后缀时原样返回，保证对克隆结果
/// 重跑命令收敛到同一个定义而不是无限追加后缀。
pub fn derived_definition_name(
    original: &str,
    use_material: bool,
    use_color: bool,
    layer_full_path: &str,
) -> String {
    let suffix = format!(
        "_{}_{}",
        override_code(use_material, use_color),
        layer_full_path
    );
    if original.ends_with(&suffix) {
        original.to_string()
    } else {
        format!("{}{}", original, suffix)
    }
}

/// 克隆块实例并应用图层属性覆盖
///
/// 块实例：以实例所在的父图层为覆盖源，对定义的每个成员应用
/// `apply_overrides`，产出派生定义；派生名已存在则复用。
/// 用原实例的变换和属性放置新实例，然后删除原实例。
///
/// 非块对象：直接就地应用覆盖并提交。
pub fn clone_with_overrides(
    doc: &mut Document,
    object_id: ObjectId,
    use_material: bool,
    use_color: bool,
) -> Result<CloneOutcome, DocumentError> {
    let object = doc
        .objects
        .get(object_id)
        .ok_or(DocumentError::ObjectNotFound(object_id.0))?;

    let attributes = object.attributes.clone();

    let instance = match &object.content {
        ObjectContent::Instance(instance) => instance.clone(),
        _ => {
            // 非块对象：覆盖自身属性
            let Some(layer) = doc.layer_of(&attributes).cloned() else {
                warn!("Object {} has no layer, skipping", object_id);
                return Ok(CloneOutcome::Skipped);
            };
            let updated = apply_overrides(&layer, &attributes, use_material, use_color);
            doc.objects.commit(object_id, updated)?;
            return Ok(CloneOutcome::InPlace);
        }
    };

    let parent_layer = doc
        .layer_of(&attributes)
        .ok_or(DocumentError::LayerNotFound(attributes.layer.0))?
        .clone();

    let definition = doc
        .instance_definitions
        .get(instance.definition)
        .ok_or(DocumentError::DefinitionNotFound(instance.definition.0))?
        .clone();

    let derived = derived_definition_name(
        &definition.name,
        use_material,
        use_color,
        &parent_layer.full_path,
    );

    let (new_definition, reused) = match doc.instance_definitions.find(&derived) {
        Some(existing) => (existing, true),
        None => {
            let members: Vec<DefinitionMember> = definition
                .members
                .iter()
                .map(|m| DefinitionMember {
                    content: m.content.clone(),
                    attributes: apply_overrides(
                        &parent_layer,
                        &m.attributes,
                        use_material,
                        use_color,
                    ),
                })
                .collect();

            let index = doc.instance_definitions.add(
                derived,
                definition.description.clone(),
                Point3::origin(),
                members,
            )?;
            (index, false)
        }
    };

    // 用原实例的变换和属性放置新实例，再删除原实例
    let new_instance = doc
        .objects
        .add_instance(new_definition, instance.xform, attributes);
    doc.objects.delete(object_id);

    Ok(CloneOutcome::Instance {
        definition: new_definition,
        instance: new_instance,
        reused,
    })
}
