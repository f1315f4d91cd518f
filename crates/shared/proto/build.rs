fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile user directory service proto
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/directory.proto"], &["proto/"])?;

    Ok(())
}
