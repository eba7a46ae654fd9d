use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build/main.rs");

    let dest = env::var("OUT_DIR").map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    let mut file = BufWriter::new(File::create(Path::new(&dest).join("gl_bindings.rs"))?);

    // the demo only ever asks for a 3.3 core context
    Registry::new(Api::Gl, (3, 3), Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)?;

    file.flush()
}
