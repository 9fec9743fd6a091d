//! BlockCAD 原生文件格式（.bcad）
//!
//! 基于 MessagePack + Zstd 的紧凑二进制格式：
//! - 体积小：MessagePack 比 JSON 小 30-50%，Zstd 再压缩 60-80%
//! - 速度快：直接序列化/反序列化，无需解析文本
//! - 简单可靠：无外部数据库依赖

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use blockcad_core::document::{Document, InstanceDefinition, InstanceDefinitionTable, ObjectTable, SceneObject};
use blockcad_core::layer::{Layer, LayerTable};
use serde::{Deserialize, Serialize};

use crate::error::FileError;
use crate::metadata::DocumentMetadata;

/// 文件魔数 "BCAD"
const MAGIC: &[u8; 4] = b"BCAD";

/// 当前文件格式版本
const FORMAT_VERSION: u32 = 1;

/// Zstd 压缩级别（1-22，3 是默认值，平衡速度和压缩比）
const COMPRESSION_LEVEL: i32 = 3;

/// 文件头（16 字节）
#[derive(Debug)]
struct FileHeader {
    /// 魔数 "BCAD"
    magic: [u8; 4],
    /// 格式版本
    version: u32,
    /// 标志位（预留）
    flags: u32,
    /// 压缩后数据长度
    compressed_size: u32,
}

impl FileHeader {
    fn new(compressed_size: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            compressed_size,
        }
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        Ok(())
    }

    fn read(reader: &mut impl Read) -> Result<Self, FileError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;

        if &magic != MAGIC {
            return Err(FileError::InvalidFormat(
                "Invalid magic number, not a BlockCAD file".to_string(),
            ));
        }

        let mut buf = [0u8; 4];

        reader.read_exact(&mut buf)?;
        let version = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let flags = u32::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            magic,
            version,
            flags,
            compressed_size,
        })
    }
}

/// 可序列化的文件内容
#[derive(Debug, Serialize, Deserialize)]
struct FileContent {
    /// 文档元数据
    metadata: DocumentMetadata,
    /// 所有图层
    layers: Vec<Layer>,
    /// 所有对象
    objects: Vec<SceneObject>,
    /// 实例定义槽位（保留空槽位以保持索引稳定）
    definitions: Vec<Option<InstanceDefinition>>,
}

/// 加载结果：文档 + 元数据
#[derive(Debug)]
pub struct LoadedDocument {
    pub document: Document,
    pub metadata: DocumentMetadata,
}

/// 保存文档到文件
pub fn save(
    document: &Document,
    metadata: &DocumentMetadata,
    path: &Path,
) -> Result<(), FileError> {
    // 收集文件内容
    let content = FileContent {
        metadata: metadata.clone(),
        layers: document.layers.all_layers().to_vec(),
        objects: document.objects.iter().cloned().collect(),
        definitions: document.instance_definitions.slots().to_vec(),
    };

    // 序列化为 MessagePack
    let msgpack_data = rmp_serde::to_vec(&content)?;

    // 使用 Zstd 压缩
    let compressed_data = zstd::encode_all(msgpack_data.as_slice(), COMPRESSION_LEVEL)?;

    // 写入文件
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = FileHeader::new(compressed_data.len() as u32);
    header.write(&mut writer)?;
    writer.write_all(&compressed_data)?;
    writer.flush()?;

    tracing::info!(
        "Saved {} objects, {} layers, {} definitions to {} ({} bytes compressed)",
        content.objects.len(),
        content.layers.len(),
        content.definitions.iter().filter(|s| s.is_some()).count(),
        path.display(),
        compressed_data.len()
    );

    Ok(())
}

/// 从文件加载文档
pub fn load(path: &Path) -> Result<LoadedDocument, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = FileHeader::read(&mut reader)?;

    // 版本检查
    if header.version > FORMAT_VERSION {
        return Err(FileError::UnsupportedVersion(format!(
            "File version {} is newer than supported version {}",
            header.version, FORMAT_VERSION
        )));
    }

    // 读取压缩数据
    let mut compressed_data = vec![0u8; header.compressed_size as usize];
    reader.read_exact(&mut compressed_data)?;

    // 解压缩并反序列化
    let msgpack_data = zstd::decode_all(compressed_data.as_slice())?;
    let content: FileContent = rmp_serde::from_slice(&msgpack_data)?;

    // 重建文档
    let mut document = Document::new();
    document.layers = LayerTable::from_layers(content.layers);
    document.objects = ObjectTable::from_objects(content.objects);
    document.instance_definitions = InstanceDefinitionTable::from_slots(content.definitions);

    tracing::info!(
        "Loaded {} objects, {} layers, {} definitions from {}",
        document.objects.count(),
        document.layers.count(),
        document.instance_definitions.count(),
        path.display()
    );

    Ok(LoadedDocument {
        document,
        metadata: content.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcad_core::document::{DefinitionMember, ObjectContent};
    use blockcad_core::geometry::{Geometry, Line};
    use blockcad_core::layer::Layer;
    use blockcad_core::math::{Point3, Transform3};
    use blockcad_core::properties::{Color, MaterialId, ObjectAttributes};

    fn sample_document() -> Document {
        let mut doc = Document::new();
        let wall = doc
            .layers
            .add_layer(Layer::new("Wall", Color::GRAY).with_material(MaterialId(1)));

        let line = Geometry::Line(Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)));
        doc.objects
            .add_geometry(line.clone(), ObjectAttributes::on_layer(wall));

        let members = vec![DefinitionMember {
            content: ObjectContent::Geometry(line),
            attributes: ObjectAttributes::on_layer(wall),
        }];
        let definition = doc
            .instance_definitions
            .add("Panel", "", Point3::origin(), members)
            .unwrap();
        doc.objects.add_instance(
            definition,
            Transform3::identity(),
            ObjectAttributes::on_layer(wall),
        );
        doc
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_document.bcad");

        let doc = sample_document();
        let mut metadata = DocumentMetadata::new("Test Document");
        metadata.author = "tester".to_string();

        save(&doc, &metadata, &file_path).expect("Failed to save");

        // 验证文件头
        let file = File::open(&file_path).expect("Failed to open");
        let mut reader = BufReader::new(file);
        let header = FileHeader::read(&mut reader).expect("Failed to read header");
        assert_eq!(&header.magic, MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);

        let loaded = load(&file_path).expect("Failed to load");

        assert_eq!(loaded.metadata.title, "Test Document");
        assert_eq!(loaded.metadata.id, metadata.id);
        assert_eq!(loaded.document.objects.count(), doc.objects.count());
        assert_eq!(loaded.document.layers.count(), doc.layers.count());
        assert_eq!(
            loaded.document.instance_definitions.find("Panel"),
            doc.instance_definitions.find("Panel")
        );

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_loaded_table_continues_id_sequence() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_id_sequence.bcad");

        let doc = sample_document();
        let existing: Vec<_> = doc.objects.iter().map(|o| o.id).collect();
        save(&doc, &DocumentMetadata::default(), &file_path).expect("Failed to save");

        let mut loaded = load(&file_path).expect("Failed to load").document;
        let new_id = loaded.objects.add_geometry(
            Geometry::Line(Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
            ObjectAttributes::on_layer(blockcad_core::layer::LayerIndex(0)),
        );
        assert!(!existing.contains(&new_id));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_invalid_magic() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_invalid.bcad");

        // 写入无效的魔数
        let mut file = File::create(&file_path).expect("Failed to create");
        file.write_all(b"XXXX").expect("Failed to write");
        file.write_all(&[0u8; 12]).expect("Failed to write padding");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::InvalidFormat(_))));

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_newer_version_rejected() {
        let temp_dir = std::env::temp_dir();
        let file_path = temp_dir.join("test_newer_version.bcad");

        let mut file = File::create(&file_path).expect("Failed to create");
        file.write_all(MAGIC).expect("Failed to write");
        file.write_all(&(FORMAT_VERSION + 1).to_le_bytes())
            .expect("Failed to write version");
        file.write_all(&[0u8; 8]).expect("Failed to write rest");

        let result = load(&file_path);
        assert!(matches!(result, Err(FileError::UnsupportedVersion(_))));

        std::fs::remove_file(&file_path).ok();
    }
}
