use rowsmith_core::schema_json_schema;

fn main() {
    let schema = schema_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
