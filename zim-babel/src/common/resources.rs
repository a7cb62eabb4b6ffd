use zim_parser::zim::ast::Document;

/// Image sources a document refers to, in document order and without duplicates.
pub fn collect_resources(doc: &Document) -> Vec<String> {
    let mut resources: Vec<String> = Vec::new();
    for image in doc.images() {
        if !resources.contains(&image.src) {
            resources.push(image.src);
        }
    }
    resources
}
