#[cfg(feature = "integrated")]
#[allow(dead_code)]
#[path = "./src/dictionary.rs"]
mod dictionary;

#[cfg(feature = "integrated")]
#[allow(dead_code)]
#[path = "./src/parse.rs"]
mod parse;

#[cfg(feature = "integrated")]
fn main() {
    const DICT_PATH: &str = "./data/dictionary.txt";

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={DICT_PATH}");

    let dictionary_file = std::fs::File::open(DICT_PATH)
        .unwrap_or_else(|e| panic!("Failed to open dictionary at {DICT_PATH}: {e}"));
    let dictionary_reader = std::io::BufReader::new(dictionary_file);

    let dictionary = dictionary::build(dictionary_reader)
        .unwrap_or_else(|e| panic!("Failed to build dictionary: {e}"));

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_path = std::path::Path::new(&out_dir).join("dict.bin");

    let bytes = bincode::serialize(&dictionary).expect("Failed to serialize dictionary");
    std::fs::write(&out_path, bytes)
        .unwrap_or_else(|e| panic!("Failed to write {}: {e}", out_path.display()));
}

#[cfg(not(feature = "integrated"))]
fn main() {}
