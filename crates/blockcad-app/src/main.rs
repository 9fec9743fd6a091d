//! BlockCAD 主应用程序入口
//!
//! 控制台命令循环：逐行读取命令名，经注册表解析后执行。
//! 命令内部的交互（选择、取点、确认）同样走控制台。

mod console;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use blockcad_commands::{create_command, CommandRegistry, CommandStatus};
use blockcad_core::document::{Document, ObjectContent};
use blockcad_core::geometry::{Circle, Geometry, Line, Polyline};
use blockcad_core::layer::Layer;
use blockcad_core::math::Point3;
use blockcad_core::properties::{Color, MaterialId, ObjectAttributes};
use blockcad_file::DocumentMetadata;

use console::ConsoleInput;

/// 应用状态：文档 + 元数据
struct BlockCadApp {
    document: Document,
    metadata: DocumentMetadata,
    registry: CommandRegistry,
}

impl BlockCadApp {
    fn new() -> Self {
        let mut app = Self {
            document: Document::new(),
            metadata: DocumentMetadata::new("Untitled"),
            registry: CommandRegistry::new(),
        };
        app.create_demo_content();
        app
    }

    /// 创建演示内容：两个带材质的图层和几条几何
    fn create_demo_content(&mut self) {
        let wall = self
            .document
            .layers
            .add_layer(Layer::new("Wall", Color::GRAY).with_material(MaterialId(1)));
        let roof = self
            .document
            .layers
            .add_layer(Layer::new("Roof", Color::RED).with_material(MaterialId(2)));
        let glass = self
            .document
            .layers
            .add_layer(Layer::new("Glass", Color::CYAN));

        for i in 0..4 {
            let x = i as f64 * 50.0;
            let line = Line::new(Point3::new(x, 0.0, 0.0), Point3::new(x, 0.0, 30.0));
            self.document.objects.add_geometry(
                Geometry::Line(line),
                ObjectAttributes::on_layer(wall),
            );
        }

        let ridge = Polyline::from_points(
            [
                Point3::new(0.0, 0.0, 30.0),
                Point3::new(75.0, 0.0, 45.0),
                Point3::new(150.0, 0.0, 30.0),
            ],
            false,
        );
        self.document.objects.add_geometry(
            Geometry::Polyline(ridge),
            ObjectAttributes::on_layer(roof),
        );

        let window = Circle::new(Point3::new(75.0, 0.0, 20.0), 8.0);
        self.document.objects.add_geometry(
            Geometry::Circle(window),
            ObjectAttributes::on_layer(glass),
        );

        info!(
            "Created {} demo objects on {} layers",
            self.document.objects.count(),
            self.document.layers.count()
        );
    }

    /// 执行一行输入，返回 false 表示退出
    fn execute<R: BufRead, W: Write>(&mut self, line: &str, io: &mut ConsoleInput<R, W>) -> bool {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return true;
        };
        let argument = parts.next().map(str::to_string);

        match word.to_uppercase().as_str() {
            "EXIT" | "QUIT" => return false,
            "HELP" | "?" => self.print_help(),
            "LIST" => self.list_objects(),
            "LAYERS" => self.list_layers(),
            "BLOCKS" => self.list_definitions(),
            "SAVE" => self.save(argument),
            "OPEN" => self.open(argument),
            other => match self.registry.lookup(other) {
                Some(kind) => {
                    let command = create_command(kind);
                    let status = command.run(&mut self.document, io);
                    match status {
                        CommandStatus::Success => println!("{}: done", command.name()),
                        CommandStatus::Cancel => println!("{}: cancelled", command.name()),
                        CommandStatus::Nothing => println!("{}: nothing to do", command.name()),
                        CommandStatus::Failure => println!("{}: failed", command.name()),
                    }
                }
                None => {
                    let suggestions = self.registry.complete(other);
                    if suggestions.is_empty() {
                        println!("Unknown command: {}", other);
                    } else {
                        println!("Unknown command: {} (did you mean {}?)", other, suggestions.join(", "));
                    }
                }
            },
        }
        true
    }

    fn print_help(&self) {
        println!("Commands:");
        for (name, _) in self.registry.all_commands() {
            println!("  {}", name);
        }
        println!("  LIST | LAYERS | BLOCKS | OPEN <file> | SAVE <file> | EXIT");
    }

    fn list_objects(&self) {
        for object in self.document.objects.iter() {
            let layer = self
                .document
                .layer_of(&object.attributes)
                .map(|l| l.full_path.as_str())
                .unwrap_or("?");
            let kind = match &object.content {
                ObjectContent::Geometry(g) => g.type_name(),
                ObjectContent::Light(_) => "Light",
                ObjectContent::Grip => "Grip",
                ObjectContent::Phantom => "Phantom",
                ObjectContent::Instance(i) => {
                    let name = self
                        .document
                        .instance_definitions
                        .get(i.definition)
                        .map(|d| d.name.as_str())
                        .unwrap_or("?");
                    println!("  {}  Instance of '{}'  layer={}", object.id, name, layer);
                    continue;
                }
            };
            println!("  {}  {}  layer={}", object.id, kind, layer);
        }
        println!("{} object(s)", self.document.objects.count());
    }

    fn list_layers(&self) {
        for (index, layer) in self.document.layers.iter() {
            let material = match layer.material {
                Some(m) => format!("material #{}", m.0),
                None => "no material".to_string(),
            };
            println!(
                "  [{}] {}  rgb({},{},{})  {}",
                index.0, layer.full_path, layer.color.r, layer.color.g, layer.color.b, material
            );
        }
    }

    fn list_definitions(&self) {
        for (index, definition) in self.document.instance_definitions.iter() {
            println!(
                "  [{}] {}  {} member(s)",
                index.0,
                definition.name,
                definition.members.len()
            );
        }
        println!(
            "{} definition(s)",
            self.document.instance_definitions.count()
        );
    }

    fn save(&mut self, path: Option<String>) {
        let Some(path) = path else {
            println!("Usage: SAVE <file.bcad>");
            return;
        };
        self.metadata.touch();
        match blockcad_file::save(&self.document, &self.metadata, &PathBuf::from(&path)) {
            Ok(()) => println!("Saved to {}", path),
            Err(e) => tracing::error!("Failed to save file: {}", e),
        }
    }

    fn open(&mut self, path: Option<String>) {
        let Some(path) = path else {
            println!("Usage: OPEN <file.bcad>");
            return;
        };
        match blockcad_file::load(&PathBuf::from(&path)) {
            Ok(loaded) => {
                self.document = loaded.document;
                self.metadata = loaded.metadata;
                println!("Opened {} ({})", path, self.metadata.title);
            }
            Err(e) => tracing::error!("Failed to open file: {}", e),
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    info!("Starting BlockCAD...");

    let mut app = BlockCadApp::new();
    app.print_help();

    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    loop {
        print!("Command: ");
        std::io::stdout().flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let entered = line.trim().to_string();

        let mut io = ConsoleInput::new(&mut reader, std::io::stdout());
        if !app.execute(&entered, &mut io) {
            break;
        }
    }

    info!("Bye");
    Ok(())
}
