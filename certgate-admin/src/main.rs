use certgate_admin::api_service;

pub fn main() {
    println!("{}", api_service().spec());
}
