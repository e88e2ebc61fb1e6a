use std::{env, fs::File, process};

use cafe_class_file::{ClassFile, Parser, ParserOptions};

fn main() {
    pretty_env_logger::init();

    let Some(path) = env::args().nth(1) else {
        log::error!("No class file given");
        process::exit(2);
    };

    let class_file = match decode(&path) {
        Ok(class_file) => class_file,
        Err(e) => {
            log::error!("Failed to decode {}: {}", path, e);
            process::exit(1);
        }
    };

    log::info!(
        "{}: version {}.{}, {} constant pool slots, {} fields, {} methods",
        path,
        class_file.major_version,
        class_file.minor_version,
        class_file.constant_pool.len(),
        class_file.fields.len(),
        class_file.methods.len()
    );

    println!("{:#?}", class_file);
}

fn decode(path: &str) -> cafe_class_file::Result<ClassFile> {
    if env::var_os("DUMP_SKIP_MAGIC").is_none() {
        return ClassFile::from_reader(File::open(path)?);
    }

    log::warn!("Skipping magic identifier check");
    let bytes = std::fs::read(path)?;
    Parser::with_options(
        &bytes,
        ParserOptions {
            verify_magic: false,
        },
    )
    .parse()
}
