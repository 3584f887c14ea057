fn main() {
    service_management_system::server::run();
}
