use faena_core::keys;
use faena_storage::objects::object_url;

#[test]
fn object_url_is_virtual_hosted() {
    let key = keys::picture_object(3, "q1", "id", "foto.jpg");
    assert_eq!(
        object_url("faena-fotos", "sa-east-1", &key),
        "https://faena-fotos.s3.sa-east-1.amazonaws.com/pictures/3/q1/id-foto.jpg"
    );
}
